//! Cell and Side types for the occupancy grid.

use std::fmt;

/// Lateral direction a blocked grain tries to slide in.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Maps a random bit to a side: 0 is left, anything else is right.
    #[must_use]
    pub fn from_bit(bit: u32) -> Self {
        if bit == 0 {
            Self::Left
        } else {
            Self::Right
        }
    }

    /// Horizontal sign of this side.
    #[must_use]
    pub fn sign(self) -> i32 {
        match self {
            Self::Left => -1,
            Self::Right => 1,
        }
    }
}

/// Grid-aligned pixel position of a grain. Top-left corner of its square.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Cell {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell offset by whole grid steps of `size` pixels, or `None` if the
    /// result leaves `i32` pixel space.
    #[must_use]
    pub fn checked_offset(self, dx: i32, dy: i32, size: i32) -> Option<Self> {
        let x = self.x.checked_add(dx.checked_mul(size)?)?;
        let y = self.y.checked_add(dy.checked_mul(size)?)?;
        Some(Self::new(x, y))
    }
}
