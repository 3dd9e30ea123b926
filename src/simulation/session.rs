//! A running Game of Life session: board, generation counter and history

use super::analysis::StabilityAnalysis;
use crate::config::{BoardConfig, BoundaryCondition};
use crate::game_of_life::{Grid, GridError};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, info};

const DEFAULT_HISTORY_DEPTH: usize = 16;

/// Outcome of a single generation step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    /// Generation number reached by this step
    pub generation: u64,
    /// Cells that changed state during the step
    pub changed: usize,
    /// Living cells after the step
    pub living: usize,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    Extinct,
    Stable,
    Oscillating { period: usize },
    GenerationLimit,
}

/// Result of [`Simulation::run`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub start_generation: u64,
    pub generations_run: usize,
    pub stop_reason: StopReason,
    pub total_changes: usize,
    pub final_living: usize,
    pub steps: Vec<StepReport>,
    pub final_grid: Grid,
}

/// Owns the board being simulated together with the bookkeeping the
/// surrounding application needs: generation count and recent states for
/// oscillation detection.
#[derive(Debug, Clone)]
pub struct Simulation {
    grid: Grid,
    generation: u64,
    history: VecDeque<Vec<bool>>,
    history_depth: usize,
}

impl Simulation {
    /// Start a session on an empty board
    pub fn new(board: &BoardConfig) -> Result<Self, GridError> {
        let grid = Grid::new(board.width, board.height, board.boundary_condition)?;
        Ok(Self::from_grid(grid))
    }

    /// Start a session on an existing board
    pub fn from_grid(grid: Grid) -> Self {
        Self {
            grid,
            generation: 0,
            history: VecDeque::with_capacity(DEFAULT_HISTORY_DEPTH),
            history_depth: DEFAULT_HISTORY_DEPTH,
        }
    }

    /// Number of past generations remembered for oscillation detection
    pub fn with_history_depth(mut self, depth: usize) -> Self {
        self.history_depth = depth.max(1);
        while self.history.len() > self.history_depth {
            self.history.pop_front();
        }
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Mutable access for manual edits between steps
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Advance one generation
    pub fn step(&mut self) -> StepReport {
        self.remember_current();

        let changed = self.grid.next_generation();
        self.generation += 1;

        let report = StepReport {
            generation: self.generation,
            changed,
            living: self.grid.living_count(),
        };
        debug!(generation = report.generation, changed, living = report.living, "stepped");
        report
    }

    /// Step up to `max_generations` times. With `stop_when_settled`, the run
    /// ends at the first generation that is extinct, unchanged, or a repeat
    /// of a remembered state; otherwise it always ends on the generation limit.
    pub fn run(&mut self, max_generations: usize, stop_when_settled: bool) -> RunSummary {
        self.run_observed(max_generations, stop_when_settled, |_, _| {})
    }

    /// Like [`Simulation::run`], calling `on_step` with each report and the
    /// board it produced
    pub fn run_observed<F>(&mut self, max_generations: usize, stop_when_settled: bool, mut on_step: F) -> RunSummary
    where
        F: FnMut(&StepReport, &Grid),
    {
        let start_generation = self.generation;
        let mut steps = Vec::new();
        let mut stop_reason = StopReason::GenerationLimit;

        for _ in 0..max_generations {
            let report = self.step();
            on_step(&report, &self.grid);
            steps.push(report);

            if !stop_when_settled {
                continue;
            }
            if let Some(reason) = self.settled(&report) {
                stop_reason = reason;
                break;
            }
        }

        let summary = RunSummary {
            start_generation,
            generations_run: steps.len(),
            stop_reason,
            total_changes: steps.iter().map(|s| s.changed).sum(),
            final_living: self.grid.living_count(),
            steps,
            final_grid: self.grid.clone(),
        };
        info!(
            generations = summary.generations_run,
            reason = ?summary.stop_reason,
            living = summary.final_living,
            "run finished"
        );
        summary
    }

    /// Kill every cell and restart the generation count
    pub fn reset(&mut self) {
        self.grid.clear();
        self.generation = 0;
        self.history.clear();
    }

    /// Replace the board with an empty one of a new size, keeping the
    /// boundary condition
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), GridError> {
        self.grid = Grid::new(width, height, self.grid.boundary_condition())?;
        self.generation = 0;
        self.history.clear();
        Ok(())
    }

    pub fn boundary_condition(&self) -> BoundaryCondition {
        self.grid.boundary_condition()
    }

    /// Clear the board and draw `pattern` centred on it. Cells that fall off
    /// a bounded board are dropped; on a toroidal board they wrap.
    pub fn load_pattern(&mut self, pattern: &Grid) {
        self.reset();

        let offset_x = (self.grid.width() as i64 - pattern.width() as i64) / 2;
        let offset_y = (self.grid.height() as i64 - pattern.height() as i64) / 2;

        for (x, y) in pattern.living_cells() {
            self.grid.set(x as i64 + offset_x, y as i64 + offset_y, true);
        }
    }

    fn remember_current(&mut self) {
        if self.history.len() == self.history_depth {
            self.history.pop_front();
        }
        self.history.push_back(self.grid.cells().to_vec());
    }

    fn settled(&self, report: &StepReport) -> Option<StopReason> {
        if report.living == 0 {
            Some(StopReason::Extinct)
        } else if report.changed == 0 {
            Some(StopReason::Stable)
        } else {
            StabilityAnalysis::find_period(&self.history, self.grid.cells())
                .map(|period| StopReason::Oscillating { period })
        }
    }
}
