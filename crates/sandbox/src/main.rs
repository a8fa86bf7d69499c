//! Desktop host: a macroquad window around a grainfall session.
//!
//! Left mouse spawns sand under the cursor, `C` clears, `P` pauses physics.
//! Closing the window ends the process.

mod overlay;

use grainfall::{cell_under_cursor, Command, ConfigError, FrameInput, PointerSource, Session, SimConfig};
use log::{error, info};
use macroquad::prelude::*;
use thiserror::Error;

const GRAIN_COLOR: Color = Color::new(1.0, 1.0, 0.6, 1.0);

#[derive(Debug, Error)]
enum HostError {
    #[error("invalid simulation settings: {0}")]
    Config(#[from] ConfigError),
}

/// Mouse position in window pixels, truncated to whole pixels.
#[derive(Debug)]
struct Mouse;

impl PointerSource for Mouse {
    fn pointer_position(&self) -> (i32, i32) {
        let (x, y) = mouse_position();
        (x as i32, y as i32)
    }
}

fn window_conf() -> Conf {
    let config = SimConfig::default();
    Conf {
        window_title: "Sands Sim 2D".to_owned(),
        window_width: config.window_width,
        window_height: config.window_height,
        window_resizable: false,
        ..Default::default()
    }
}

fn pressed_commands() -> Vec<Command> {
    [(KeyCode::C, 'c'), (KeyCode::P, 'p')]
        .into_iter()
        .filter(|(code, _)| is_key_pressed(*code))
        .filter_map(|(_, key)| Command::from_key(key))
        .collect()
}

async fn run() -> Result<(), HostError> {
    let config = SimConfig::default();
    let mut session = Session::new(&config)?;
    let font = overlay::load_font().await;
    info!(
        "{}x{} window, {} px grains, floor at y={}",
        config.window_width,
        config.window_height,
        config.cell_size,
        config.floor_y()
    );

    loop {
        let commands = pressed_commands();
        let input = FrameInput {
            delta: get_frame_time(),
            cursor: cell_under_cursor(&Mouse, config.cell_size),
            spawn_held: is_mouse_button_down(MouseButton::Left),
            commands: &commands,
        };

        session.frame(&input, |view| {
            clear_background(BLACK);
            let size = view.cell_size as f32;
            draw_rectangle(view.cursor.x as f32, view.cursor.y as f32, size, size, GRAIN_COLOR);
            for cell in view.cells {
                draw_rectangle(cell.x as f32, cell.y as f32, size, size, GRAIN_COLOR);
            }
            if let Some(font) = &font {
                overlay::draw_fps(font, view.fps);
            }
        });

        next_frame().await;
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();
    if let Err(err) = run().await {
        error!("{err}");
        std::process::exit(1);
    }
}
