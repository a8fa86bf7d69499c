//! Error types for grainfall.

use thiserror::Error;

/// Rejected simulation settings.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("cell size must be positive, got {0}")]
    CellSize(i32),
    #[error("window dimensions must be positive, got {width}x{height}")]
    WindowSize { width: i32, height: i32 },
    #[error("floor ratio must be in (0, 1], got {0}")]
    FloorRatio(f32),
    #[error("physics rate must be non-zero")]
    PhysicsRate,
    #[error("spawn interval must be finite and non-negative, got {0}")]
    SpawnInterval(f32),
}
