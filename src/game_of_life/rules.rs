//! Game of Life rules implementation (B3/S23)

use super::Grid;
use rayon::prelude::*;

/// Neighbor counts at which a dead cell comes alive
const BIRTH: [u8; 1] = [3];

/// Neighbor counts at which a live cell stays alive
const SURVIVAL: [u8; 2] = [2, 3];

/// Game of Life rules engine
pub struct GameOfLifeRules;

impl GameOfLifeRules {
    /// Check if a cell should be alive in the next generation given its current state and neighbor count
    pub fn should_be_alive(current_state: bool, neighbor_count: u8) -> bool {
        if current_state {
            SURVIVAL.contains(&neighbor_count)
        } else {
            BIRTH.contains(&neighbor_count)
        }
    }

    /// Compute the next generation's cells, row-major, reading only `current`
    pub fn next_cells(current: &Grid) -> Vec<bool> {
        current
            .cells()
            .par_iter()
            .enumerate()
            .map(|(idx, &alive)| {
                let (x, y) = current.coords(idx);
                let neighbors = current.count_neighbors(x as i64, y as i64);
                Self::should_be_alive(alive, neighbors)
            })
            .collect()
    }

    /// Evolve a copy of the grid one generation forward, leaving `current` untouched
    pub fn evolve(current: &Grid) -> Grid {
        let mut next = current.clone();
        next.next_generation();
        next
    }

    /// Evolve the grid for multiple generations
    pub fn evolve_generations(mut grid: Grid, generations: usize) -> Grid {
        for _ in 0..generations {
            grid.next_generation();
        }
        grid
    }

    /// Number of cells whose state differs between two same-sized grids
    pub fn changed_cells(before: &Grid, after: &Grid) -> usize {
        before
            .cells()
            .iter()
            .zip(after.cells())
            .filter(|(a, b)| a != b)
            .count()
    }

    /// Get neighbor counts that would result in birth (dead -> alive)
    pub fn birth_neighbor_counts() -> Vec<u8> {
        BIRTH.to_vec()
    }

    /// Get neighbor counts that would result in survival (alive -> alive)
    pub fn survival_neighbor_counts() -> Vec<u8> {
        SURVIVAL.to_vec()
    }

    /// Get the maximum possible neighbor count for any cell
    pub fn max_neighbor_count() -> u8 {
        8
    }
}
