//! Conway's Game of Life board
//!
//! A fixed-size grid engine with bounded or toroidal addressing, plus a
//! simulation session that steps the board and reports when it settles.

pub mod config;
pub mod game_of_life;
pub mod simulation;
pub mod utils;

pub use config::Settings;
pub use game_of_life::{Grid, GridError};
pub use simulation::{RunSummary, Simulation};

use anyhow::{Context, Result};
use tracing::info;

/// Build a session from settings, with the configured pattern (if any)
/// centred on the board
pub fn build_simulation(settings: &Settings) -> Result<Simulation> {
    let mut simulation = Simulation::new(&settings.board)
        .context("Failed to create board")?
        .with_history_depth(settings.playback.history_depth);

    if let Some(ref pattern_file) = settings.input.pattern_file {
        let pattern = game_of_life::load_grid_from_file(pattern_file, settings.board.boundary_condition)?;
        info!(
            pattern = %pattern_file.display(),
            width = pattern.width(),
            height = pattern.height(),
            "loaded pattern"
        );
        simulation.load_pattern(&pattern);
    }

    Ok(simulation)
}

/// Main entry point: build a session and run it for the configured number of generations
pub fn run_simulation(settings: &Settings) -> Result<RunSummary> {
    let mut simulation = build_simulation(settings)?;
    Ok(simulation.run(settings.playback.generations, settings.playback.stop_when_settled))
}
