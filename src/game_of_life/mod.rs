//! Game of Life core functionality

pub mod error;
pub mod grid;
pub mod rules;
pub mod io;

pub use error::GridError;
pub use grid::{Grid, NEIGHBOR_OFFSETS};
pub use rules::GameOfLifeRules;
pub use io::{load_grid_from_file, load_grids_from_directory, save_grid_to_file, create_example_grids};
