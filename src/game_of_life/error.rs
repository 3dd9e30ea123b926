//! Errors raised by the grid engine

use thiserror::Error;

/// Failures that can occur while building a grid.
///
/// Once a grid exists, every operation on it is total: out-of-range
/// coordinates are either wrapped or ignored, never reported.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("invalid grid dimensions {width}x{height}: both must be at least 1")]
    InvalidDimensions { width: usize, height: usize },

    #[error("pattern contains no rows")]
    EmptyPattern,

    #[error("row {row} has length {len}, expected {expected} (all rows must have the same length)")]
    RaggedRow { row: usize, len: usize, expected: usize },

    #[error("invalid character '{ch}' at row {row}, column {col}; only '0' and '1' are allowed")]
    InvalidCell { ch: char, row: usize, col: usize },
}
