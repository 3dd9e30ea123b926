//! Pattern file I/O for Game of Life grids

use super::Grid;
use crate::config::BoundaryCondition;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{debug, warn};

/// Sample patterns written by [`create_example_grids`], as `(file stem, rows)`
const EXAMPLE_PATTERNS: [(&str, &str); 4] = [
    ("glider", "00100\n10100\n01100\n00000\n00000\n"),
    ("blinker", "000\n111\n000\n"),
    ("block", "0000\n0110\n0110\n0000\n"),
    ("beacon", "110000\n110000\n001100\n001100\n"),
];

/// Load a grid from a text file
/// Format: Each line represents a row, with '1' for alive cells and '0' for dead cells
pub fn load_grid_from_file<P: AsRef<Path>>(
    path: P,
    boundary_condition: BoundaryCondition,
) -> Result<Grid> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read pattern file: {}", path.as_ref().display()))?;

    parse_grid_from_string(&content, boundary_condition)
        .with_context(|| format!("Failed to parse pattern file: {}", path.as_ref().display()))
}

/// Parse a grid from its textual dump; blank lines are skipped
pub fn parse_grid_from_string(content: &str, boundary_condition: BoundaryCondition) -> Result<Grid> {
    let lines: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    Ok(Grid::from_rows(&lines, boundary_condition)?)
}

/// Save a grid to a text file
pub fn save_grid_to_file<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(&path, grid_to_string(grid))
        .with_context(|| format!("Failed to write pattern file: {}", path.as_ref().display()))?;

    Ok(())
}

/// Convert a grid to its textual dump
pub fn grid_to_string(grid: &Grid) -> String {
    grid.render()
}

/// Load every `.txt` pattern in a directory, sorted by file stem.
/// Files that fail to parse are skipped with a warning.
pub fn load_grids_from_directory<P: AsRef<Path>>(
    dir_path: P,
    boundary_condition: BoundaryCondition,
) -> Result<Vec<(String, Grid)>> {
    let dir = std::fs::read_dir(&dir_path)
        .with_context(|| format!("Failed to read directory: {}", dir_path.as_ref().display()))?;

    let mut grids = Vec::new();

    for entry in dir {
        let path = entry.context("Failed to read directory entry")?.path();

        if !path.is_file() || !matches!(path.extension(), Some(ext) if ext == "txt") {
            continue;
        }

        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();

        match load_grid_from_file(&path, boundary_condition) {
            Ok(grid) => grids.push((name, grid)),
            Err(e) => warn!(path = %path.display(), "skipping pattern: {e:#}"),
        }
    }

    grids.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(grids)
}

/// Write the sample pattern files into `output_dir`
pub fn create_example_grids<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    for (name, rows) in EXAMPLE_PATTERNS {
        let path = dir.join(format!("{name}.txt"));
        std::fs::write(&path, rows)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        debug!(path = %path.display(), "wrote example pattern");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::GridError;
    use tempfile::tempdir;

    #[test]
    fn test_parse_grid_from_string() {
        let content = "010\n101\n010\n";
        let grid = parse_grid_from_string(content, BoundaryCondition::Dead).unwrap();

        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.living_count(), 4);
        assert!(grid.get(1, 0));
        assert!(grid.get(0, 1));
        assert!(grid.get(2, 1));
        assert!(grid.get(1, 2));
    }

    #[test]
    fn test_parse_skips_blank_lines_and_padding() {
        let content = "\n  011 \n\n110\n   \n";
        let grid = parse_grid_from_string(content, BoundaryCondition::Wrap).unwrap();

        assert_eq!(grid.height(), 2);
        assert_eq!(grid_to_string(&grid), "011\n110\n");
        assert!(grid.wraps());
    }

    #[test]
    fn test_invalid_input() {
        let err = parse_grid_from_string("010\n1X1\n010\n", BoundaryCondition::Dead).unwrap_err();
        assert_eq!(
            err.downcast_ref::<GridError>(),
            Some(&GridError::InvalidCell { ch: 'X', row: 1, col: 1 })
        );

        assert!(parse_grid_from_string("010\n11\n010\n", BoundaryCondition::Dead).is_err());
        assert!(parse_grid_from_string("", BoundaryCondition::Dead).is_err());
    }

    #[test]
    fn test_file_operations() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("nested/test_grid.txt");

        let original = Grid::from_rows(&["101", "010"], BoundaryCondition::Dead).unwrap();
        save_grid_to_file(&original, &file_path).unwrap();

        let loaded = load_grid_from_file(&file_path, BoundaryCondition::Dead).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_missing_file_names_path() {
        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("nope.txt");

        let err = load_grid_from_file(&missing, BoundaryCondition::Dead).unwrap_err();
        assert!(format!("{err}").contains("nope.txt"));
    }

    #[test]
    fn test_create_and_load_example_grids() {
        let temp_dir = tempdir().unwrap();
        create_example_grids(temp_dir.path()).unwrap();
        std::fs::write(temp_dir.path().join("broken.txt"), "01\n2\n").unwrap();
        std::fs::write(temp_dir.path().join("notes.md"), "not a pattern").unwrap();

        let grids = load_grids_from_directory(temp_dir.path(), BoundaryCondition::Dead).unwrap();
        let names: Vec<&str> = grids.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["beacon", "blinker", "block", "glider"]);

        let glider = &grids[3].1;
        assert_eq!(glider.width(), 5);
        assert_eq!(glider.height(), 5);
        assert_eq!(glider.living_count(), 5);
    }
}
