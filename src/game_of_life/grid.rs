//! Grid representation and addressing for the Game of Life board

use super::error::GridError;
use super::rules::GameOfLifeRules;
use crate::config::BoundaryCondition;
use itertools::iproduct;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Relative `(dx, dy)` offsets of the eight cells surrounding a cell.
#[rustfmt::skip]
pub const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// A fixed-size board of live/dead cells.
///
/// Cells are stored row-major in a flat buffer. Coordinates are `(x, y)`
/// with `x` the column and `y` the row; they are signed so that callers can
/// address off-board cells, which either wrap around (toroidal boards) or
/// read as dead and swallow writes (bounded boards).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridData", into = "GridData")]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
    boundary_condition: BoundaryCondition,
}

impl Grid {
    /// Create a new grid with every cell dead
    pub fn new(width: usize, height: usize, boundary_condition: BoundaryCondition) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }

        Ok(Self {
            width,
            height,
            cells: vec![false; width * height],
            boundary_condition,
        })
    }

    /// Create a grid from a 2D boolean array, indexed `cells[y][x]`
    pub fn from_cells(cells: Vec<Vec<bool>>, boundary_condition: BoundaryCondition) -> Result<Self, GridError> {
        let height = cells.len();
        let width = cells.first().map(Vec::len).ok_or(GridError::EmptyPattern)?;

        if width == 0 {
            return Err(GridError::InvalidDimensions { width, height });
        }

        for (row, cells_in_row) in cells.iter().enumerate() {
            if cells_in_row.len() != width {
                return Err(GridError::RaggedRow { row, len: cells_in_row.len(), expected: width });
            }
        }

        Ok(Self {
            width,
            height,
            cells: cells.into_iter().flatten().collect(),
            boundary_condition,
        })
    }

    /// Create a grid from rows of `'1'` (alive) and `'0'` (dead) characters
    pub fn from_rows<S: AsRef<str>>(rows: &[S], boundary_condition: BoundaryCondition) -> Result<Self, GridError> {
        let cells = rows
            .iter()
            .enumerate()
            .map(|(row, line)| {
                line.as_ref()
                    .chars()
                    .enumerate()
                    .map(|(col, ch)| match ch {
                        '1' => Ok(true),
                        '0' => Ok(false),
                        _ => Err(GridError::InvalidCell { ch, row, col }),
                    })
                    .collect::<Result<Vec<bool>, GridError>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_cells(cells, boundary_condition)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn boundary_condition(&self) -> BoundaryCondition {
        self.boundary_condition
    }

    /// Whether off-board coordinates wrap around to the opposite edge
    pub fn wraps(&self) -> bool {
        self.boundary_condition == BoundaryCondition::Wrap
    }

    /// Row-major view of every cell
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Total number of cells on the board
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Inverse of the flat index: `(x, y)` of buffer slot `idx`
    #[inline]
    pub fn coords(&self, idx: usize) -> (usize, usize) {
        (idx % self.width, idx / self.width)
    }

    /// Map a coordinate pair onto a buffer slot under this grid's boundary
    /// condition. `None` means the coordinate is off a bounded board.
    fn resolve(&self, x: i64, y: i64) -> Option<usize> {
        let (width, height) = (self.width as i64, self.height as i64);

        match self.boundary_condition {
            BoundaryCondition::Wrap => {
                let wrapped_x = x.rem_euclid(width) as usize;
                let wrapped_y = y.rem_euclid(height) as usize;
                Some(self.index(wrapped_x, wrapped_y))
            }
            BoundaryCondition::Dead => {
                if (0..width).contains(&x) && (0..height).contains(&y) {
                    Some(self.index(x as usize, y as usize))
                } else {
                    None
                }
            }
        }
    }

    /// Get cell value at coordinates; cells off a bounded board are dead
    pub fn get(&self, x: i64, y: i64) -> bool {
        self.resolve(x, y).is_some_and(|idx| self.cells[idx])
    }

    /// Set cell value at coordinates; writes off a bounded board are ignored
    pub fn set(&mut self, x: i64, y: i64, alive: bool) {
        if let Some(idx) = self.resolve(x, y) {
            self.cells[idx] = alive;
        }
    }

    /// Flip the cell at coordinates
    pub fn toggle(&mut self, x: i64, y: i64) {
        if let Some(idx) = self.resolve(x, y) {
            self.cells[idx] = !self.cells[idx];
        }
    }

    /// Kill every cell in place
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Count living neighbors of a cell, looked up through the same
    /// addressing as [`Grid::get`]
    pub fn count_neighbors(&self, x: i64, y: i64) -> u8 {
        // On a torus, bring the centre on-board first so the offsets cannot overflow
        let (x, y) = match self.boundary_condition {
            BoundaryCondition::Wrap => (x.rem_euclid(self.width as i64), y.rem_euclid(self.height as i64)),
            BoundaryCondition::Dead => (x, y),
        };

        NEIGHBOR_OFFSETS
            .iter()
            .filter(|&&(dx, dy)| match (x.checked_add(dx), y.checked_add(dy)) {
                (Some(nx), Some(ny)) => self.get(nx, ny),
                _ => false,
            })
            .count() as u8
    }

    /// Advance the board one generation.
    ///
    /// The next state is computed entirely from the current one into a fresh
    /// buffer, which then replaces the old buffer in a single assignment.
    /// Returns how many cells changed state.
    pub fn next_generation(&mut self) -> usize {
        let next = GameOfLifeRules::next_cells(self);
        let changed = self
            .cells
            .iter()
            .zip(&next)
            .filter(|(before, after)| before != after)
            .count();

        self.cells = next;
        changed
    }

    /// Get all living cell coordinates as `(x, y)`, row by row
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        iproduct!(0..self.height, 0..self.width)
            .filter(|&(y, x)| self.cells[self.index(x, y)])
            .map(|(y, x)| (x, y))
            .collect()
    }

    /// Count total living cells
    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Check if the grid is empty (no living cells)
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| !cell)
    }

    /// Row-major dump, one line per row, `1` for alive and `0` for dead
    pub fn render(&self) -> String {
        self.to_string()
    }

    fn row_string(&self, y: usize) -> String {
        self.cells[y * self.width..(y + 1) * self.width]
            .iter()
            .map(|&cell| if cell { '1' } else { '0' })
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            writeln!(f, "{}", self.row_string(y))?;
        }
        Ok(())
    }
}

/// Serialized form of a grid: the boundary condition plus the textual rows
#[derive(Serialize, Deserialize)]
struct GridData {
    boundary_condition: BoundaryCondition,
    rows: Vec<String>,
}

impl TryFrom<GridData> for Grid {
    type Error = GridError;

    fn try_from(data: GridData) -> Result<Self, Self::Error> {
        Grid::from_rows(&data.rows, data.boundary_condition)
    }
}

impl From<Grid> for GridData {
    fn from(grid: Grid) -> Self {
        Self {
            boundary_condition: grid.boundary_condition,
            rows: (0..grid.height).map(|y| grid.row_string(y)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank(width: usize, height: usize, boundary: BoundaryCondition) -> Grid {
        Grid::new(width, height, boundary).unwrap()
    }

    #[test]
    fn test_grid_creation() {
        let grid = blank(3, 4, BoundaryCondition::Dead);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 4);
        assert_eq!(grid.len(), 12);
        assert!(grid.is_empty());
        assert!(!grid.wraps());
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert_eq!(
            Grid::new(0, 5, BoundaryCondition::Wrap),
            Err(GridError::InvalidDimensions { width: 0, height: 5 })
        );
        assert!(matches!(
            Grid::new(5, 0, BoundaryCondition::Dead),
            Err(GridError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_grid_from_cells() {
        let cells = vec![
            vec![true, false, true],
            vec![false, true, false],
        ];
        let grid = Grid::from_cells(cells, BoundaryCondition::Dead).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.living_count(), 3);
        assert!(grid.get(2, 0));
        assert!(grid.get(1, 1));
        assert!(!grid.get(0, 1));
    }

    #[test]
    fn test_from_cells_rejects_bad_shapes() {
        assert_eq!(Grid::from_cells(vec![], BoundaryCondition::Dead), Err(GridError::EmptyPattern));
        assert_eq!(
            Grid::from_cells(vec![vec![true, true], vec![true]], BoundaryCondition::Dead),
            Err(GridError::RaggedRow { row: 1, len: 1, expected: 2 })
        );
    }

    #[test]
    fn test_from_rows_rejects_unknown_characters() {
        let err = Grid::from_rows(&["010", "0x0"], BoundaryCondition::Dead).unwrap_err();
        assert_eq!(err, GridError::InvalidCell { ch: 'x', row: 1, col: 1 });
    }

    #[test]
    fn test_wrap_is_periodic() {
        let mut grid = blank(5, 4, BoundaryCondition::Wrap);
        grid.set(1, 2, true);

        for k in -3i64..=3 {
            for m in -3i64..=3 {
                assert!(grid.get(1 + k * 5, 2 + m * 4), "k={k} m={m}");
                assert!(!grid.get(2 + k * 5, 2 + m * 4));
            }
        }
    }

    #[test]
    fn test_wrap_negative_coordinates() {
        let mut grid = blank(5, 5, BoundaryCondition::Wrap);
        grid.set(-1, -1, true);
        assert!(grid.get(4, 4));
        assert_eq!(grid.living_cells(), vec![(4, 4)]);

        // (-6, 9) lands on the same cell
        grid.toggle(-6, 9);
        assert!(!grid.get(4, 4));
        assert!(grid.is_empty());
    }

    #[test]
    fn test_bounded_out_of_range_is_dead_and_ignored() {
        let mut grid = blank(5, 5, BoundaryCondition::Dead);
        grid.set(0, 0, true);

        for (x, y) in [(-1, 0), (0, -1), (5, 0), (0, 5), (-1, -1), (100, -100)] {
            grid.set(x, y, true);
            grid.toggle(x, y);
            assert!(!grid.get(x, y));
        }

        assert_eq!(grid.living_cells(), vec![(0, 0)]);
    }

    #[test]
    fn test_set_and_clear_are_idempotent() {
        let mut grid = blank(4, 4, BoundaryCondition::Dead);
        grid.set(2, 3, true);
        let once = grid.clone();
        grid.set(2, 3, true);
        assert_eq!(grid, once);

        grid.clear();
        let cleared = grid.clone();
        grid.clear();
        assert_eq!(grid, cleared);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_toggle_involution() {
        for boundary in [BoundaryCondition::Dead, BoundaryCondition::Wrap] {
            let mut grid = blank(4, 3, boundary);
            grid.set(1, 1, true);
            let original = grid.clone();

            for (x, y) in [(1, 1), (0, 2), (-1, 7)] {
                grid.toggle(x, y);
                grid.toggle(x, y);
                assert_eq!(grid, original);
            }
        }
    }

    #[test]
    fn test_neighbor_counting() {
        let grid = Grid::from_rows(&["111", "101", "111"], BoundaryCondition::Dead).unwrap();

        assert_eq!(grid.count_neighbors(1, 1), 8);
        // Corner sees its two edge neighbours; the dead centre does not count
        assert_eq!(grid.count_neighbors(0, 0), 2);
        assert_eq!(grid.count_neighbors(-1, -1), 1);
    }

    #[test]
    fn test_neighbor_counting_excludes_self() {
        let mut grid = blank(5, 5, BoundaryCondition::Dead);
        grid.set(2, 2, true);
        assert_eq!(grid.count_neighbors(2, 2), 0);
        assert_eq!(grid.count_neighbors(1, 1), 1);
    }

    #[test]
    fn test_neighbor_counting_at_extreme_coordinates() {
        // i64::MAX and i64::MIN both land on column 2 of a 5-wide torus
        let mut torus = blank(5, 5, BoundaryCondition::Wrap);
        torus.set(1, 0, true);
        torus.set(3, 4, true);

        assert_eq!(torus.count_neighbors(2, 0), 2);
        assert_eq!(torus.count_neighbors(i64::MAX, 0), 2);
        assert_eq!(torus.count_neighbors(i64::MIN, 0), 2);
        assert_eq!(torus.count_neighbors(i64::MAX, i64::MIN), torus.count_neighbors(2, 2));

        let mut bounded = blank(5, 5, BoundaryCondition::Dead);
        bounded.set(4, 4, true);

        for (x, y) in [(i64::MAX, 0), (i64::MIN, 0), (0, i64::MAX), (i64::MIN, i64::MAX)] {
            assert_eq!(bounded.count_neighbors(x, y), 0);
        }
    }

    #[test]
    fn test_boundary_conditions() {
        let rows = ["10", "01"];

        let grid_dead = Grid::from_rows(&rows, BoundaryCondition::Dead).unwrap();
        assert_eq!(grid_dead.count_neighbors(0, 0), 1);

        // On a 2x2 torus, (1,1) is reached through four different offsets
        let grid_wrap = Grid::from_rows(&rows, BoundaryCondition::Wrap).unwrap();
        assert_eq!(grid_wrap.count_neighbors(0, 0), 4);
    }

    #[test]
    fn test_empty_board_is_stable() {
        let mut grid = blank(6, 6, BoundaryCondition::Wrap);
        assert_eq!(grid.next_generation(), 0);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_block_is_still_life() {
        let mut grid = Grid::from_rows(&["0000", "0110", "0110", "0000"], BoundaryCondition::Dead).unwrap();
        let before = grid.living_cells();

        assert_eq!(grid.next_generation(), 0);
        assert_eq!(grid.living_cells(), before);
    }

    #[test]
    fn test_blinker_oscillates() {
        for boundary in [BoundaryCondition::Dead, BoundaryCondition::Wrap] {
            let mut grid = blank(5, 5, boundary);
            for (x, y) in [(1, 0), (1, 1), (1, 2)] {
                grid.set(x, y, true);
            }
            let original = grid.clone();

            let changed = grid.next_generation();
            assert!(changed > 0);
            assert_eq!(grid.living_cells(), vec![(0, 1), (1, 1), (2, 1)]);

            let changed = grid.next_generation();
            assert!(changed > 0);
            assert_eq!(grid, original);
        }
    }

    #[test]
    fn test_lonely_cell_dies() {
        let mut grid = blank(5, 5, BoundaryCondition::Dead);
        grid.set(2, 2, true);

        assert_eq!(grid.next_generation(), 1);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_wrap_lets_blinker_cross_edges() {
        // Horizontal blinker straddling the left/right seam
        let mut grid = blank(5, 5, BoundaryCondition::Wrap);
        for x in [-1, 0, 1] {
            grid.set(x, 2, true);
        }

        grid.next_generation();
        assert_eq!(grid.living_cells(), vec![(0, 1), (0, 2), (0, 3)]);
    }

    #[test]
    fn test_render() {
        let grid = Grid::from_rows(&["010", "101"], BoundaryCondition::Dead).unwrap();
        assert_eq!(grid.render(), "010\n101\n");
    }

    #[test]
    fn test_json_representation() {
        let grid = Grid::from_rows(&["01", "10"], BoundaryCondition::Wrap).unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(json, r#"{"boundary_condition":"wrap","rows":["01","10"]}"#);

        let parsed: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, grid);

        let ragged = r#"{"boundary_condition":"dead","rows":["01","1"]}"#;
        assert!(serde_json::from_str::<Grid>(ragged).is_err());
    }
}
