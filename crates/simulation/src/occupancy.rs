//! The set of occupied cells.

use hashbrown::HashMap;

use crate::cell::Cell;

/// Grain slots plus a hashed count of how many grains sit on each cell.
///
/// Slots keep their index for the life of the set; only `clear` removes them.
/// Several grains may share a cell, so membership is a count rather than a flag.
#[derive(Debug, Default, Clone)]
pub struct Occupancy {
    slots: Vec<Cell>,
    counts: HashMap<Cell, u32>,
}

impl Occupancy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a grain, even if the cell is already taken.
    pub fn insert(&mut self, cell: Cell) {
        self.slots.push(cell);
        *self.counts.entry(cell).or_insert(0) += 1;
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.counts.clear();
    }

    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        self.counts.contains_key(&cell)
    }

    /// Number of grains on `cell`.
    #[must_use]
    pub fn count(&self, cell: Cell) -> u32 {
        self.counts.get(&cell).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Position of the grain in slot `index`.
    ///
    /// # Panics
    /// If `index` is out of range.
    #[must_use]
    pub fn get(&self, index: usize) -> Cell {
        self.slots[index]
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Cell] {
        &self.slots
    }

    /// Moves the grain in slot `index` to `to`, keeping its slot.
    pub fn relocate(&mut self, index: usize, to: Cell) {
        let from = self.slots[index];
        if from == to {
            return;
        }
        if let Some(count) = self.counts.get_mut(&from) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(&from);
            }
        }
        *self.counts.entry(to).or_insert(0) += 1;
        self.slots[index] = to;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn duplicates_are_kept() {
        let mut set = Occupancy::new();
        set.insert(Cell::new(8, 8));
        set.insert(Cell::new(8, 8));
        assert_eq!(set.len(), 2);
        assert_eq!(set.count(Cell::new(8, 8)), 2);
    }

    #[test]
    fn relocating_one_duplicate_keeps_the_cell_occupied() {
        let mut set = Occupancy::new();
        set.insert(Cell::new(8, 8));
        set.insert(Cell::new(8, 8));
        set.relocate(0, Cell::new(8, 16));
        assert!(set.contains(Cell::new(8, 8)));
        assert!(set.contains(Cell::new(8, 16)));

        set.relocate(1, Cell::new(16, 16));
        assert!(!set.contains(Cell::new(8, 8)));
        assert_eq!(set.as_slice(), &[Cell::new(8, 16), Cell::new(16, 16)]);
    }

    #[test]
    fn relocate_to_same_cell_is_noop() {
        let mut set = Occupancy::new();
        set.insert(Cell::new(0, 480));
        set.relocate(0, Cell::new(0, 480));
        assert_eq!(set.count(Cell::new(0, 480)), 1);
    }

    #[test]
    fn clear_empties_everything() {
        let mut set = Occupancy::new();
        set.insert(Cell::new(0, 0));
        set.insert(Cell::new(8, 0));
        set.clear();
        assert!(set.is_empty());
        assert!(!set.contains(Cell::new(0, 0)));
    }

    fn arb_cell() -> impl Strategy<Value = Cell> {
        (0i32..8, 0i32..8).prop_map(|(x, y)| Cell::new(x * 8, y * 8))
    }

    // Index counts always match a linear scan of the slots.
    proptest! {
        #[test]
        fn prop_counts_match_slots(
            spawns in proptest::collection::vec(arb_cell(), 1..40),
            moves in proptest::collection::vec((any::<prop::sample::Index>(), arb_cell()), 0..40),
        ) {
            let mut set = Occupancy::new();
            for cell in &spawns {
                set.insert(*cell);
            }
            for (index, to) in &moves {
                set.relocate(index.index(set.len()), *to);
            }
            for x in 0..8 {
                for y in 0..8 {
                    let cell = Cell::new(x * 8, y * 8);
                    let scanned = set.as_slice().iter().filter(|c| **c == cell).count() as u32;
                    prop_assert_eq!(set.count(cell), scanned);
                    prop_assert_eq!(set.contains(cell), scanned > 0);
                }
            }
            prop_assert_eq!(set.len(), spawns.len());
        }
    }
}
