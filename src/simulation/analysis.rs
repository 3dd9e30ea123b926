//! Stability analysis of an evolution path

use crate::game_of_life::Grid;
use serde::{Deserialize, Serialize};

/// Longest oscillation period looked for by [`StabilityAnalysis::analyze`]
const MAX_PERIOD: usize = 8;

/// Classification of how a pattern behaves over an evolution path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StabilityAnalysis {
    /// The final state has no living cells
    pub is_extinct: bool,
    /// The first state survives the first step unchanged
    pub is_still_life: bool,
    /// Smallest period (> 1) after which the first state recurs
    pub oscillation_period: Option<usize>,
    /// Living cells at every generation of the path
    pub population: Vec<usize>,
}

impl StabilityAnalysis {
    /// Analyze an evolution path whose first element is the starting state
    pub fn analyze(evolution_path: &[Grid]) -> Self {
        if evolution_path.len() < 2 {
            return Self::default();
        }

        Self {
            is_extinct: evolution_path.last().is_some_and(Grid::is_empty),
            is_still_life: Self::check_still_life(evolution_path),
            oscillation_period: Self::check_oscillator(evolution_path),
            population: evolution_path.iter().map(Grid::living_count).collect(),
        }
    }

    pub fn is_oscillator(&self) -> bool {
        self.oscillation_period.is_some()
    }

    fn check_still_life(evolution_path: &[Grid]) -> bool {
        !evolution_path[0].is_empty() && evolution_path[0] == evolution_path[1]
    }

    fn check_oscillator(evolution_path: &[Grid]) -> Option<usize> {
        (2..=MAX_PERIOD.min(evolution_path.len() - 1)).find(|&period| {
            evolution_path[0] == evolution_path[period]
                && (1..evolution_path.len() - period)
                    .all(|i| evolution_path[i] == evolution_path[i + period])
        })
    }

    /// How many generations back `current` last appeared in `history`,
    /// where `history` is ordered oldest first and ends with the state
    /// immediately preceding `current`
    pub fn find_period<'a, I>(history: I, current: &[bool]) -> Option<usize>
    where
        I: IntoIterator<Item = &'a Vec<bool>>,
        I::IntoIter: DoubleEndedIterator,
    {
        history
            .into_iter()
            .rev()
            .position(|past| past.as_slice() == current)
            .map(|distance| distance + 1)
    }

    /// One-word description for reports
    pub fn label(&self) -> &'static str {
        if self.is_extinct {
            "Extinct"
        } else if self.is_still_life {
            "Still Life"
        } else if self.is_oscillator() {
            "Oscillator"
        } else {
            "Evolving"
        }
    }
}
