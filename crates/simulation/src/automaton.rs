//! Fixed-timestep sand automaton.

use log::{debug, trace, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::api::GrainApi;
use crate::cell::{Cell, Side};
use crate::config::SimConfig;
use crate::error::ConfigError;
use crate::occupancy::Occupancy;
use crate::sand;

/// Accumulated time within this many seconds of a whole number of steps is
/// rounded up to it, and the shortfall is dropped rather than deferred. It only
/// absorbs the rounding of `f32` frame deltas.
const STEP_TOLERANCE: f64 = 1e-6;

/// Backlog (seconds) above which a frame is logged as a spike.
const SPIKE_WARN_SECS: f64 = 1.0;

/// Source of left/right tie-breaks for blocked grains.
pub trait SideSource {
    fn next_side(&mut self) -> Side;
}

/// Uniform random sides from a seeded generator.
#[derive(Debug, Clone)]
pub struct SeededSides {
    rng: SmallRng,
}

impl SeededSides {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl SideSource for SeededSides {
    fn next_side(&mut self) -> Side {
        Side::from_bit(self.rng.gen_range(0..2))
    }
}

/// Replays a fixed list of sides, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct FixedSides {
    sides: Vec<Side>,
    next: usize,
}

impl FixedSides {
    /// Plays `first`, then `rest`, then starts over.
    #[must_use]
    pub fn new(first: Side, rest: Vec<Side>) -> Self {
        let mut sides = Vec::with_capacity(rest.len() + 1);
        sides.push(first);
        sides.extend(rest);
        Self { sides, next: 0 }
    }

    #[must_use]
    pub fn always(side: Side) -> Self {
        Self::new(side, Vec::new())
    }
}

impl SideSource for FixedSides {
    fn next_side(&mut self) -> Side {
        let side = self.sides[self.next];
        self.next = (self.next + 1) % self.sides.len();
        side
    }
}

/// Occupied cells plus the clock that advances them.
///
/// Owns the accumulator and the tie-break source; nothing here is global.
#[derive(Debug)]
pub struct Automaton<S = SeededSides> {
    grains: Occupancy,
    accumulator: f64,
    enabled: bool,
    sides: S,
    cell_size: i32,
    floor: i32,
    fixed_step: f64,
}

impl Automaton<SeededSides> {
    /// Automaton seeded from `config.seed`.
    pub fn new(config: &SimConfig) -> Result<Self, ConfigError> {
        Self::with_sides(config, SeededSides::new(config.seed))
    }
}

impl<S: SideSource> Automaton<S> {
    pub fn with_sides(config: &SimConfig, sides: S) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            grains: Occupancy::new(),
            accumulator: 0.0,
            enabled: true,
            sides,
            cell_size: config.cell_size,
            floor: config.floor_y(),
            fixed_step: config.fixed_step(),
        })
    }

    /// Adds a grain at `cell`. No dedup, no limit.
    pub fn spawn(&mut self, cell: Cell) {
        debug!("spawn grain at {cell}");
        self.grains.insert(cell);
    }

    pub fn clear(&mut self) {
        debug!("clear {} grains", self.grains.len());
        self.grains.clear();
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        debug!("physics enabled: {enabled}");
        self.enabled = enabled;
    }

    pub fn toggle_enabled(&mut self) {
        self.set_enabled(!self.enabled);
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.grains.contains(cell)
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        self.grains.as_slice()
    }

    #[must_use]
    pub fn grains(&self) -> &Occupancy {
        &self.grains
    }

    #[must_use]
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    #[must_use]
    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    #[must_use]
    pub fn floor(&self) -> i32 {
        self.floor
    }

    #[must_use]
    pub fn fixed_step(&self) -> f64 {
        self.fixed_step
    }

    /// Advance by `delta` seconds of wall time. Returns the passes run,
    /// saturating at `u32::MAX`.
    ///
    /// While disabled nothing happens, the accumulator included, so paused
    /// time is deferred rather than caught up on resume. Negative deltas count
    /// as zero and non-finite ones are ignored.
    pub fn step(&mut self, delta: f32) -> u32 {
        if !self.enabled {
            return 0;
        }
        if !delta.is_finite() {
            warn!("ignoring non-finite frame delta {delta}");
            return 0;
        }

        self.accumulator += f64::from(delta.max(0.0));
        if self.accumulator > SPIKE_WARN_SECS {
            warn!("physics backlog of {:.3}s", self.accumulator);
        }

        let due = ((self.accumulator + STEP_TOLERANCE) / self.fixed_step).floor();
        self.accumulator = (self.accumulator - due * self.fixed_step).max(0.0);
        let passes = due as u64;
        for _ in 0..passes {
            self.pass();
        }
        trace!("{passes} passes, {:.4}s carried", self.accumulator);
        u32::try_from(passes).unwrap_or(u32::MAX)
    }

    /// Evaluate every grain once, in slot order. Moves are visible to grains
    /// evaluated later in the same pass.
    pub fn pass(&mut self) {
        for index in 0..self.grains.len() {
            let mut api = GrainApi::new(&mut self.grains, index, self.cell_size, self.floor);
            sand::update_sand(&mut api, &mut self.sides);
        }
    }
}
