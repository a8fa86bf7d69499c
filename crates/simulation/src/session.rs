//! Per-frame driver that sits between a host and the automaton.
//!
//! A frame runs in a fixed order: commands, throttled spawning, render,
//! physics. Rendering therefore sees a fresh spawn on the frame it was
//! requested, and that grain's first fall happens after the draw.

use log::{debug, trace};

use crate::automaton::{Automaton, SeededSides, SideSource};
use crate::cell::Cell;
use crate::config::SimConfig;
use crate::error::ConfigError;

/// Discrete host commands.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    Clear,
    TogglePhysics,
}

impl Command {
    /// Keyboard binding: `C` clears, `P` toggles physics.
    #[must_use]
    pub fn from_key(key: char) -> Option<Self> {
        match key.to_ascii_lowercase() {
            'c' => Some(Self::Clear),
            'p' => Some(Self::TogglePhysics),
            _ => None,
        }
    }
}

/// What the host observed since the last frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameInput<'a> {
    /// Seconds since the previous frame.
    pub delta: f32,
    /// Cell under the pointer.
    pub cursor: Cell,
    /// Whether the spawn button is held down.
    pub spawn_held: bool,
    pub commands: &'a [Command],
}

/// Read-only state handed to the render callback.
#[derive(Clone, Copy, Debug)]
pub struct FrameView<'a> {
    pub cells: &'a [Cell],
    pub cursor: Cell,
    pub cell_size: i32,
    pub fps: u32,
    pub physics_enabled: bool,
}

/// Frames per second for display. Zero for a zero or invalid delta.
#[must_use]
pub fn fps_from_delta(delta: f32) -> u32 {
    if delta.is_finite() && delta > 0.0 {
        (1.0 / delta) as u32
    } else {
        0
    }
}

/// An automaton plus the host-side spawn throttle.
#[derive(Debug)]
pub struct Session<S = SeededSides> {
    automaton: Automaton<S>,
    spawn_interval: f32,
    spawn_accumulator: f32,
    fps: u32,
}

impl Session<SeededSides> {
    pub fn new(config: &SimConfig) -> Result<Self, ConfigError> {
        Ok(Self::from_automaton(Automaton::new(config)?, config))
    }
}

impl<S: SideSource> Session<S> {
    #[must_use]
    pub fn from_automaton(automaton: Automaton<S>, config: &SimConfig) -> Self {
        Self {
            automaton,
            spawn_interval: config.spawn_interval,
            spawn_accumulator: 0.0,
            fps: 0,
        }
    }

    #[must_use]
    pub fn automaton(&self) -> &Automaton<S> {
        &self.automaton
    }

    pub fn automaton_mut(&mut self) -> &mut Automaton<S> {
        &mut self.automaton
    }

    /// FPS of the most recent frame.
    #[must_use]
    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn apply(&mut self, command: Command) {
        debug!("command {command:?}");
        match command {
            Command::Clear => self.automaton.clear(),
            Command::TogglePhysics => self.automaton.toggle_enabled(),
        }
    }

    /// Run one frame. `render` is called after input handling and before
    /// physics. Returns the number of physics passes run.
    pub fn frame<F>(&mut self, input: &FrameInput<'_>, render: F) -> u32
    where
        F: FnOnce(&FrameView<'_>),
    {
        self.fps = fps_from_delta(input.delta);

        for &command in input.commands {
            self.apply(command);
        }

        // The first spawn waits one full interval, as does every later one.
        if input.spawn_held && self.spawn_accumulator >= self.spawn_interval {
            self.automaton.spawn(input.cursor);
            self.spawn_accumulator = 0.0;
        }
        if input.delta.is_finite() {
            self.spawn_accumulator =
                (self.spawn_accumulator + input.delta.max(0.0)).min(self.spawn_interval);
        }

        render(&FrameView {
            cells: self.automaton.cells(),
            cursor: input.cursor,
            cell_size: self.automaton.cell_size(),
            fps: self.fps,
            physics_enabled: self.automaton.is_enabled(),
        });

        let passes = self.automaton.step(input.delta);
        trace!("frame: {} grains, {passes} passes", self.automaton.cells().len());
        passes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: f32 = 1.0 / 30.0;

    fn session() -> Session {
        Session::new(&SimConfig::default()).unwrap()
    }

    fn input(delta: f32, cursor: Cell, spawn_held: bool, commands: &[Command]) -> FrameInput<'_> {
        FrameInput {
            delta,
            cursor,
            spawn_held,
            commands,
        }
    }

    #[test]
    fn fps_guards_zero_delta() {
        assert_eq!(fps_from_delta(0.0), 0);
        assert_eq!(fps_from_delta(-1.0), 0);
        assert_eq!(fps_from_delta(f32::NAN), 0);
        assert_eq!(fps_from_delta(0.5), 2);
        assert_eq!(fps_from_delta(0.016), 62);
    }

    #[test]
    fn key_bindings() {
        assert_eq!(Command::from_key('c'), Some(Command::Clear));
        assert_eq!(Command::from_key('C'), Some(Command::Clear));
        assert_eq!(Command::from_key('P'), Some(Command::TogglePhysics));
        assert_eq!(Command::from_key('x'), None);
    }

    #[test]
    fn spawn_is_rendered_before_it_falls() {
        let mut session = session();
        let cursor = Cell::new(64, 0);
        // Prime the throttle.
        session.frame(&input(0.05, cursor, false, &[]), |_| {});
        assert!(session.automaton().cells().is_empty());

        let mut seen = Vec::new();
        let passes = session.frame(&input(STEP, cursor, true, &[]), |view| {
            seen = view.cells.to_vec();
        });
        assert_eq!(seen, vec![cursor]);
        assert_eq!(passes, 1);
        assert_eq!(session.automaton().cells(), &[Cell::new(64, 8)]);
    }

    #[test]
    fn spawns_are_throttled() {
        let mut session = session();
        let cursor = Cell::new(0, 0);
        session.automaton_mut().set_enabled(false);
        // 0.02s frames: spawns land on frames 4, 7 and 10.
        for _ in 0..12 {
            session.frame(&input(0.02, cursor, true, &[]), |_| {});
        }
        assert_eq!(session.automaton().cells().len(), 3);
    }

    #[test]
    fn non_finite_delta_leaves_the_throttle_alone() {
        let mut session = session();
        let cursor = Cell::new(0, 0);
        session.automaton_mut().set_enabled(false);
        let passes = session.frame(&input(f32::INFINITY, cursor, true, &[]), |_| {});
        assert_eq!(passes, 0);
        session.frame(&input(f32::NAN, cursor, true, &[]), |_| {});
        assert!(session.automaton().cells().is_empty());

        session.frame(&input(0.05, cursor, true, &[]), |_| {});
        session.frame(&input(0.0, cursor, true, &[]), |_| {});
        assert_eq!(session.automaton().cells(), &[cursor]);
    }

    #[test]
    fn commands_apply_before_render() {
        let mut session = session();
        session.automaton_mut().spawn(Cell::new(0, 0));
        let mut rendered = None;
        session.frame(
            &input(0.0, Cell::default(), false, &[Command::Clear, Command::TogglePhysics]),
            |view| rendered = Some((view.cells.len(), view.physics_enabled)),
        );
        assert_eq!(rendered, Some((0, false)));
    }

    #[test]
    fn paused_frames_still_render() {
        let mut session = session();
        session.automaton_mut().spawn(Cell::new(16, 16));
        session.apply(Command::TogglePhysics);
        let mut frames = 0;
        for _ in 0..5 {
            let passes = session.frame(&input(STEP, Cell::default(), false, &[]), |view| {
                assert_eq!(view.cells, &[Cell::new(16, 16)]);
                frames += 1;
            });
            assert_eq!(passes, 0);
        }
        assert_eq!(frames, 5);
        assert_eq!(session.fps(), fps_from_delta(STEP));
    }
}
