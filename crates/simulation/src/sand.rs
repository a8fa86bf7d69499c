//! Sand rule: fall straight down, else try one random diagonal.

use crate::api::GrainApi;
use crate::automaton::SideSource;

/// Only the drawn diagonal is tried. A grain that loses the draw stays put
/// until the next pass, even if the other diagonal is free.
pub fn update_sand<S: SideSource + ?Sized>(api: &mut GrainApi, sides: &mut S) {
    if !api.is_occupied(0, 1) {
        api.fall();
        return;
    }

    // `shift` refuses a diagonal outside `i32` pixel space.
    let dx = sides.next_side().sign();
    if !api.is_occupied(dx, 1) {
        api.shift(dx, 1);
    }
}
