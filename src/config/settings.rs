//! Configuration settings for the Game of Life board

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    pub board: BoardConfig,
    pub playback: PlaybackConfig,
    pub limits: SizeLimits,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    pub width: usize,
    pub height: usize,
    pub boundary_condition: BoundaryCondition,
}

/// How coordinates past the board's edges are addressed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryCondition {
    /// Off-board cells are permanently dead and cannot be written
    Dead,
    /// Edges connect to the opposite edges (toroidal board)
    #[default]
    Wrap,
}

impl BoundaryCondition {
    pub fn from_wrap(wrap: bool) -> Self {
        if wrap {
            Self::Wrap
        } else {
            Self::Dead
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    pub generations: usize,
    pub tick_interval_ms: u64,
    pub stop_when_settled: bool,
    pub history_depth: usize,
}

/// Board size bounds enforced on configured boards. The grid engine itself
/// accepts any non-zero size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SizeLimits {
    pub min_size: usize,
    pub max_size: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    pub pattern_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub output_directory: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
    Visual,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            boundary_condition: BoundaryCondition::Wrap,
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            generations: 50,
            tick_interval_ms: 250,
            stop_when_settled: true,
            history_depth: 16,
        }
    }
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self {
            min_size: 5,
            max_size: 30,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            output_directory: PathBuf::from("output/runs"),
        }
    }
}

impl SizeLimits {
    pub fn contains(&self, size: usize) -> bool {
        (self.min_size..=self.max_size).contains(&size)
    }
}

impl Settings {
    /// Load and validate settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let settings = Self::parse_file(path)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a YAML file without validating them, so that
    /// command line overrides can still be applied
    pub fn parse_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.playback.generations == 0 {
            anyhow::bail!("Number of generations must be positive");
        }

        if self.playback.history_depth == 0 {
            anyhow::bail!("History depth must be positive");
        }

        let limits = &self.limits;
        if limits.min_size == 0 || limits.min_size > limits.max_size {
            anyhow::bail!("Invalid size limits: min {} / max {}", limits.min_size, limits.max_size);
        }

        let board = &self.board;
        if !limits.contains(board.width) || !limits.contains(board.height) {
            anyhow::bail!(
                "Board size {}x{} is outside the allowed range {}..={}",
                board.width, board.height, limits.min_size, limits.max_size
            );
        }

        if let Some(ref pattern) = self.input.pattern_file {
            if !pattern.exists() {
                anyhow::bail!("Pattern file does not exist: {}", pattern.display());
            }
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(generations) = cli_overrides.generations {
            self.playback.generations = generations;
        }
        if let Some(width) = cli_overrides.width {
            self.board.width = width;
        }
        if let Some(height) = cli_overrides.height {
            self.board.height = height;
        }
        if let Some(wrap) = cli_overrides.wrap {
            self.board.boundary_condition = BoundaryCondition::from_wrap(wrap);
        }
        if let Some(ref pattern_file) = cli_overrides.pattern_file {
            self.input.pattern_file = Some(pattern_file.clone());
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub generations: Option<usize>,
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub wrap: Option<bool>,
    pub pattern_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}
