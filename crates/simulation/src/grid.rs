//! Pixel to cell mapping on a square grid.

use crate::cell::Cell;

/// Anything that can report the pointer position relative to the window.
pub trait PointerSource {
    /// Current pointer position in window pixels.
    fn pointer_position(&self) -> (i32, i32);
}

impl PointerSource for (i32, i32) {
    fn pointer_position(&self) -> (i32, i32) {
        *self
    }
}

/// Snap a pixel coordinate to the top-left corner of its cell.
///
/// Uses the truncating remainder, so negative coordinates round towards
/// zero: `cell_of(-3, -9, 8)` is `(0, -8)`.
#[must_use]
pub fn cell_of(x: i32, y: i32, cell_size: i32) -> Cell {
    Cell::new(x - x % cell_size, y - y % cell_size)
}

/// The cell currently under the pointer.
#[must_use]
pub fn cell_under_cursor<P: PointerSource + ?Sized>(pointer: &P, cell_size: i32) -> Cell {
    let (x, y) = pointer.pointer_position();
    cell_of(x, y, cell_size)
}
