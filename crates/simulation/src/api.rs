//! Relative-offset API for the grain update rule.

use crate::cell::Cell;
use crate::occupancy::Occupancy;

/// View of one grain slot. Offsets are in whole cells, not pixels.
/// Reads see moves made earlier in the same pass.
#[derive(Debug)]
pub struct GrainApi<'a> {
    pub grains: &'a mut Occupancy,
    pub index: usize,
    pub cell_size: i32,
    pub floor: i32,
}

impl<'a> GrainApi<'a> {
    pub fn new(grains: &'a mut Occupancy, index: usize, cell_size: i32, floor: i32) -> Self {
        Self {
            grains,
            index,
            cell_size,
            floor,
        }
    }

    /// Current position of this grain.
    #[must_use]
    pub fn cell(&self) -> Cell {
        self.grains.get(self.index)
    }

    /// Neighbouring cell, or `None` past the edge of `i32` pixel space.
    #[must_use]
    pub fn neighbour(&self, dx: i32, dy: i32) -> Option<Cell> {
        self.cell().checked_offset(dx, dy, self.cell_size)
    }

    /// Cells outside `i32` pixel space are never occupied.
    #[must_use]
    pub fn is_occupied(&self, dx: i32, dy: i32) -> bool {
        self.neighbour(dx, dy)
            .is_some_and(|cell| self.grains.contains(cell))
    }

    /// One cell down, never past the floor.
    pub fn fall(&mut self) {
        let cell = self.cell();
        let y = cell.y.saturating_add(self.cell_size).min(self.floor);
        self.grains.relocate(self.index, Cell::new(cell.x, y));
    }

    /// Unclamped move by a cell offset. Returns false, without moving, if
    /// the target is outside `i32` pixel space.
    pub fn shift(&mut self, dx: i32, dy: i32) -> bool {
        match self.neighbour(dx, dy) {
            Some(to) => {
                self.grains.relocate(self.index, to);
                true
            }
            None => false,
        }
    }
}
