//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::game_of_life::Grid;
use crate::simulation::{RunSummary, StabilityAnalysis, StopReason};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Format grids and run results for the terminal
pub struct GridFormatter;

impl GridFormatter {
    /// Format a grid in compact form
    pub fn format_grid_compact(grid: &Grid) -> String {
        let mut output = String::with_capacity(grid.height() * (grid.width() * 3 + 1));
        for row in grid.cells().chunks(grid.width()) {
            output.extend(row.iter().map(|&cell| if cell { '█' } else { '·' }));
            output.push('\n');
        }
        output
    }

    /// Format a grid with coordinates
    pub fn format_grid_with_coords(grid: &Grid) -> String {
        let mut output = String::new();

        // Header with column numbers
        output.push_str("   ");
        for x in 0..grid.width() {
            output.push_str(&format!("{:2}", x % 10));
        }
        output.push('\n');

        for (y, row) in grid.cells().chunks(grid.width()).enumerate() {
            output.push_str(&format!("{:2} ", y));
            for &cell in row {
                output.push_str(if cell { "██" } else { "··" });
            }
            output.push('\n');
        }

        output
    }

    pub fn describe_stop_reason(reason: &StopReason) -> String {
        match reason {
            StopReason::Extinct => "Extinct".to_string(),
            StopReason::Stable => "Still Life".to_string(),
            StopReason::Oscillating { period } => format!("Oscillator (period {})", period),
            StopReason::GenerationLimit => "Generation limit reached".to_string(),
        }
    }

    /// Format a run summary; with `show_steps`, include the per-step table
    pub fn format_run_summary(summary: &RunSummary, show_steps: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Generations: {} → {} ({} run)\n",
            summary.start_generation,
            summary.start_generation + summary.generations_run as u64,
            summary.generations_run
        ));
        output.push_str(&format!("Outcome: {}\n", Self::describe_stop_reason(&summary.stop_reason)));
        output.push_str(&format!("Total changes: {}\n", summary.total_changes));
        output.push_str(&format!("Living cells: {}\n", summary.final_living));

        if show_steps {
            output.push_str("\nGen      | Changed | Living\n");
            output.push_str("---------|---------|-------\n");
            for step in &summary.steps {
                output.push_str(&format!("{:8} | {:7} | {:6}\n", step.generation, step.changed, step.living));
            }
        }

        output.push_str("\nFinal State:\n");
        output.push_str(&Self::format_grid_compact(&summary.final_grid));
        output
    }

    /// Format a stability analysis
    pub fn format_analysis(analysis: &StabilityAnalysis) -> String {
        let mut output = String::new();

        output.push_str(&format!("Type: {}\n", analysis.label()));
        if let Some(period) = analysis.oscillation_period {
            output.push_str(&format!("Period: {}\n", period));
        }

        let population: Vec<String> = analysis.population.iter().map(ToString::to_string).collect();
        output.push_str(&format!("Population: {}\n", population.join(" → ")));
        output
    }

    /// Save a run report into `output_dir` in the given format, returning the written path
    pub fn save_run<P: AsRef<Path>>(
        summary: &RunSummary,
        output_dir: P,
        format: OutputFormat,
    ) -> Result<PathBuf> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

        let (filename, content) = match format {
            OutputFormat::Text => ("run_summary.txt", Self::format_run_summary(summary, true)),
            OutputFormat::Json => (
                "run_summary.json",
                serde_json::to_string_pretty(summary).context("Failed to serialize run summary")?,
            ),
            OutputFormat::Visual => {
                let mut content = Self::format_run_summary(summary, false);
                content.push('\n');
                content.push_str(&Self::format_grid_with_coords(&summary.final_grid));
                ("run_visual.txt", content)
            }
        };

        let path = output_dir.join(filename);
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write run report: {}", path.display()))?;
        Ok(path)
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && std::env::var("TERM").unwrap_or_default() != "dumb"
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BoardConfig, BoundaryCondition};
    use crate::simulation::Simulation;
    use tempfile::tempdir;

    fn blinker_summary() -> RunSummary {
        let mut sim = Simulation::new(&BoardConfig {
            width: 5,
            height: 5,
            boundary_condition: BoundaryCondition::Dead,
        })
        .unwrap();
        for x in 1..4 {
            sim.grid_mut().set(x, 2, true);
        }
        sim.run(10, true)
    }

    #[test]
    fn test_grid_formatting() {
        let grid = Grid::from_rows(&["101", "010"], BoundaryCondition::Dead).unwrap();

        assert_eq!(GridFormatter::format_grid_compact(&grid), "█·█\n·█·\n");

        let with_coords = GridFormatter::format_grid_with_coords(&grid);
        assert!(with_coords.starts_with("    0 1 2\n"));
        assert!(with_coords.contains(" 1 ··██··"));
    }

    #[test]
    fn test_run_summary_formatting() {
        let text = GridFormatter::format_run_summary(&blinker_summary(), true);

        assert!(text.contains("Outcome: Oscillator (period 2)"));
        assert!(text.contains("Total changes: 8"));
        assert!(text.contains("       2 |       4 |      3"));
    }

    #[test]
    fn test_save_run_formats() {
        let temp_dir = tempdir().unwrap();
        let summary = blinker_summary();

        let text_path = GridFormatter::save_run(&summary, temp_dir.path(), OutputFormat::Text).unwrap();
        assert!(std::fs::read_to_string(text_path).unwrap().contains("Gen"));

        let json_path = GridFormatter::save_run(&summary, temp_dir.path(), OutputFormat::Json).unwrap();
        let parsed: RunSummary = serde_json::from_str(&std::fs::read_to_string(json_path).unwrap()).unwrap();
        assert_eq!(parsed.final_grid, summary.final_grid);
        assert_eq!(parsed.stop_reason, StopReason::Oscillating { period: 2 });

        let visual_path = GridFormatter::save_run(&summary, temp_dir.path(), OutputFormat::Visual).unwrap();
        assert!(visual_path.ends_with("run_visual.txt"));
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Red);
        assert!(colored.contains("test"));
        assert!(ColorOutput::success("OK").contains("OK"));
    }
}
