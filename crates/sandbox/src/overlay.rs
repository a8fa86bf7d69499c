//! FPS text in the top-left corner.

use std::path::PathBuf;

use log::warn;
use macroquad::prelude::*;

const FONT_FILE: &str = "data/SourceCodePro-Regular.ttf";
const FONT_SIZE: u16 = 16;
const TEXT_ORIGIN: (f32, f32) = (15.0, 15.0);

/// Font path next to the running executable.
fn font_path() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    Some(exe.parent()?.join(FONT_FILE))
}

/// Load the overlay font. Failures are logged and disable the overlay.
pub async fn load_font() -> Option<Font> {
    let Some(path) = font_path() else {
        warn!("cannot locate executable directory, FPS overlay disabled");
        return None;
    };
    match load_ttf_font(&path.to_string_lossy()).await {
        Ok(font) => Some(font),
        Err(err) => {
            warn!("failed to load {}: {err:?}, FPS overlay disabled", path.display());
            None
        }
    }
}

pub fn draw_fps(font: &Font, fps: u32) {
    // draw_text_ex positions the baseline, not the top of the glyphs.
    draw_text_ex(
        &format!("FPS: {fps}"),
        TEXT_ORIGIN.0,
        TEXT_ORIGIN.1 + f32::from(FONT_SIZE),
        TextParams {
            font: Some(font),
            font_size: FONT_SIZE,
            color: WHITE,
            ..Default::default()
        },
    );
}
