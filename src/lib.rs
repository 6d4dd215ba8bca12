//! Conway's Game of Life on a fixed-size, double-buffered grid
//!
//! The [`game_of_life::AutomatonGrid`] is the kernel. [`driver::Session`]
//! wraps it with the pause flag, step cadence and display scale that an
//! interactive front end needs.

pub mod config;
pub mod driver;
pub mod game_of_life;
pub mod report;
pub mod utils;

pub use config::Settings;
pub use driver::{InputEvent, Session};
pub use game_of_life::AutomatonGrid;
pub use report::RunReport;

use anyhow::Result;

/// Seed a fresh session from settings with its configured pattern, if any
pub fn build_session(settings: &Settings) -> Result<Session> {
    let mut session = Session::from_settings(settings);

    let pattern = match (&settings.input.pattern_file, &settings.input.pattern_name) {
        (Some(path), _) => Some(game_of_life::Pattern::load(path)?),
        (None, Some(name)) => Some(game_of_life::Pattern::named(name)?),
        (None, None) => None,
    };

    if let Some(pattern) = pattern {
        let (x, y) = pattern.centered_origin(session.grid());
        let placed = pattern.place(session.grid_mut(), x, y);
        tracing::debug!(placed, x, y, "seeded grid from pattern");
    }

    Ok(session)
}
