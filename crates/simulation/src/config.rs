//! Simulation settings.

use crate::error::ConfigError;

/// Geometry and timing of a simulation.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct SimConfig {
    /// Side of one grain square, in pixels.
    pub cell_size: i32,
    pub window_width: i32,
    pub window_height: i32,
    /// Fraction of the window height grains may fall to.
    pub floor_ratio: f32,
    /// Physics passes per simulated second.
    pub physics_hz: u32,
    /// Minimum seconds between spawns while the button is held.
    pub spawn_interval: f32,
    /// Seed for the left/right tie-break.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            cell_size: 8,
            window_width: 640,
            window_height: 640,
            floor_ratio: 0.75,
            physics_hz: 30,
            spawn_interval: 0.05,
            seed: 0,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size <= 0 {
            return Err(ConfigError::CellSize(self.cell_size));
        }
        if self.window_width <= 0 || self.window_height <= 0 {
            return Err(ConfigError::WindowSize {
                width: self.window_width,
                height: self.window_height,
            });
        }
        if !(self.floor_ratio > 0.0 && self.floor_ratio <= 1.0) {
            return Err(ConfigError::FloorRatio(self.floor_ratio));
        }
        if self.physics_hz == 0 {
            return Err(ConfigError::PhysicsRate);
        }
        if !self.spawn_interval.is_finite() || self.spawn_interval < 0.0 {
            return Err(ConfigError::SpawnInterval(self.spawn_interval));
        }
        Ok(())
    }

    /// Largest y a grain may reach.
    #[must_use]
    pub fn floor_y(&self) -> i32 {
        (self.window_height as f32 * self.floor_ratio) as i32
    }

    /// Seconds per physics pass.
    #[must_use]
    pub fn fixed_step(&self) -> f64 {
        1.0 / f64::from(self.physics_hz)
    }
}
