//! Configuration management for the Game of Life board

pub mod settings;

pub use settings::{
    Settings, BoardConfig, PlaybackConfig, SizeLimits, InputConfig, OutputConfig,
    BoundaryCondition, OutputFormat, CliOverrides
};
