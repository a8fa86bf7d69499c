//! Falling sand on a fixed grid, stepped at a fixed rate.

pub mod api;
pub mod automaton;
pub mod cell;
pub mod config;
pub mod error;
pub mod grid;
pub mod occupancy;
mod sand;
pub mod session;


pub use automaton::{Automaton, FixedSides, SeededSides, SideSource};
pub use cell::{Cell, Side};
pub use config::SimConfig;
pub use error::ConfigError;
pub use grid::{cell_of, cell_under_cursor, PointerSource};
pub use session::{fps_from_delta, Command, FrameInput, FrameView, Session};

use wasm_bindgen::prelude::*;

/// Browser handle. JS owns the canvas and the clock and calls `frame` once
/// per animation frame.
#[wasm_bindgen]
#[derive(Debug)]
pub struct Universe {
    session: Session,
    width: i32,
    height: i32,
    pending: Vec<Command>,
    /// Flattened `[x0, y0, x1, y1, ...]` as drawn on the last frame.
    drawn: Vec<i32>,
}

#[wasm_bindgen]
impl Universe {
    #[wasm_bindgen(constructor)]
    pub fn new(width: i32, height: i32, cell_size: i32, seed: u64) -> Result<Universe, JsError> {
        let config = SimConfig {
            cell_size,
            window_width: width,
            window_height: height,
            seed,
            ..SimConfig::default()
        };
        Ok(Self {
            session: Session::new(&config)?,
            width,
            height,
            pending: Vec::new(),
            drawn: Vec::new(),
        })
    }

    /// Queue the command bound to `key`. Returns whether the key is bound.
    pub fn key(&mut self, key: &str) -> bool {
        match key.chars().next().and_then(Command::from_key) {
            Some(command) if key.chars().count() == 1 => {
                self.pending.push(command);
                true
            }
            _ => false,
        }
    }

    /// Spawn immediately at a pixel position, bypassing the throttle.
    /// Returns false, spawning nothing, if the position is off the window.
    pub fn spawn_at(&mut self, x: i32, y: i32) -> bool {
        if !(0..self.width).contains(&x) || !(0..self.height).contains(&y) {
            return false;
        }
        let cell = cell_of(x, y, self.session.automaton().cell_size());
        self.session.automaton_mut().spawn(cell);
        true
    }

    pub fn clear(&mut self) {
        self.pending.push(Command::Clear);
    }

    pub fn toggle_physics(&mut self) {
        self.pending.push(Command::TogglePhysics);
    }

    /// Run one frame. Returns the number of physics passes. The pointer is
    /// clamped into the window.
    pub fn frame(&mut self, delta: f32, pointer_x: i32, pointer_y: i32, button_down: bool) -> u32 {
        let commands = std::mem::take(&mut self.pending);
        let pointer = (
            pointer_x.clamp(0, self.width - 1),
            pointer_y.clamp(0, self.height - 1),
        );
        let input = FrameInput {
            delta,
            cursor: cell_under_cursor(&pointer, self.session.automaton().cell_size()),
            spawn_held: button_down,
            commands: &commands,
        };
        let drawn = &mut self.drawn;
        self.session.frame(&input, |view| {
            drawn.clear();
            drawn.extend(view.cells.iter().flat_map(|cell| [cell.x, cell.y]));
        })
    }

    /// Cells as drawn on the last frame, flattened.
    #[must_use]
    pub fn cells(&self) -> Vec<i32> {
        self.drawn.clone()
    }

    #[must_use]
    pub fn grain_count(&self) -> usize {
        self.session.automaton().cells().len()
    }

    #[must_use]
    pub fn fps(&self) -> u32 {
        self.session.fps()
    }

    #[must_use]
    pub fn cell_size(&self) -> i32 {
        self.session.automaton().cell_size()
    }

    #[must_use]
    pub fn physics_enabled(&self) -> bool {
        self.session.automaton().is_enabled()
    }
}
