// grid.rs - Grid types and helpers for Conway's Game of Life

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::GridError;

/// Default chance that a freshly randomised cell starts alive.
pub const DEFAULT_ALIVE_PROBABILITY: f64 = 0.33;

/// Relative offsets of the 8 neighbours: NW, N, NE, W, E, SW, S, SE.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    ( 0, -1),          ( 0, 1),
    ( 1, -1), ( 1, 0), ( 1, 1),
];

/// State of a single cell. The discriminant doubles as the cell's weight
/// when summing neighbours.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum CellState {
    #[default]
    Dead = 0,
    Alive = 1,
}

impl CellState {
    pub const fn value(self) -> u8 {
        self as u8
    }

    pub const fn is_alive(self) -> bool {
        matches!(self, CellState::Alive)
    }

    pub const fn toggled(self) -> Self {
        match self {
            CellState::Alive => CellState::Dead,
            CellState::Dead => CellState::Alive,
        }
    }
}

impl From<CellState> for u8 {
    fn from(cell: CellState) -> Self {
        cell.value()
    }
}

impl TryFrom<u8> for CellState {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CellState::Dead),
            1 => Ok(CellState::Alive),
            other => Err(format!("cell state must be 0 or 1, got {other}")),
        }
    }
}

pub type Row = Vec<CellState>;
/// Rows of cells indexed `[row][col]` from the top-left corner.
pub type Grid = Vec<Row>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridSize {
    pub rows: usize,
    pub cols: usize,
}

impl GridSize {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Shape of `grid`, taking the column count from its first row.
    pub fn of(grid: &[Row]) -> Self {
        Self {
            rows: grid.len(),
            cols: grid.first().map_or(0, Vec::len),
        }
    }

    pub const fn area(&self) -> usize {
        self.rows * self.cols
    }

    pub const fn contains(&self, coordinate: CellCoordinate) -> bool {
        coordinate.row < self.rows && coordinate.col < self.cols
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellCoordinate {
    pub row: usize,
    pub col: usize,
}

impl CellCoordinate {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for CellCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Grid of the given size with every cell dead.
pub fn make_empty(size: GridSize) -> Grid {
    vec![vec![CellState::Dead; size.cols]; size.rows]
}

/// Grid where each cell is independently alive with `probability`,
/// drawn from the thread-local RNG.
pub fn make_random(size: GridSize, probability: f64) -> Grid {
    make_random_with(size, probability, &mut rand::rng())
}

/// Same as [`make_random`] with a caller-supplied RNG.
///
/// NaN counts as 0; anything outside `[0, 1]` is clamped.
pub fn make_random_with<R: Rng>(size: GridSize, probability: f64, rng: &mut R) -> Grid {
    let probability = if probability.is_nan() { 0.0 } else { probability.clamp(0.0, 1.0) };
    (0..size.rows)
        .map(|_| {
            (0..size.cols)
                .map(|_| if rng.random_bool(probability) { CellState::Alive } else { CellState::Dead })
                .collect()
        })
        .collect()
}

/// Row-by-row copy; the result shares no storage with `grid`.
pub fn clone_grid(grid: &[Row]) -> Grid {
    grid.iter().map(|row| row.to_vec()).collect()
}

pub fn count_alive(grid: &[Row]) -> usize {
    grid.iter()
        .map(|row| row.iter().filter(|cell| cell.is_alive()).count())
        .sum()
}

/// Number of live cells among the in-bounds neighbours of `coordinate`.
/// Edges do not wrap.
pub fn count_neighbors(grid: &[Row], coordinate: CellCoordinate) -> Result<u8, GridError> {
    let size = GridSize::of(grid);
    if !size.contains(coordinate) {
        return Err(GridError::OutOfBounds { coordinate, size });
    }
    Ok(live_neighbors(grid, size, coordinate.row, coordinate.col))
}

/// Unchecked neighbour count; the caller guarantees `(row, col)` is in range.
pub(crate) fn live_neighbors(grid: &[Row], size: GridSize, row: usize, col: usize) -> u8 {
    let mut count = 0;
    for &(dr, dc) in &NEIGHBOR_OFFSETS {
        let (Some(nr), Some(nc)) = (row.checked_add_signed(dr), col.checked_add_signed(dc)) else {
            continue;
        };
        if nr < size.rows && nc < size.cols {
            count += grid[nr][nc].value();
        }
    }
    count
}

/// Checks that every row has the length of the first one.
pub fn validate_shape(grid: &[Row]) -> Result<GridSize, GridError> {
    let size = GridSize::of(grid);
    match grid.iter().position(|row| row.len() != size.cols) {
        Some(row) => Err(GridError::InvalidShape {
            row,
            expected: size.cols,
            found: grid[row].len(),
        }),
        None => Ok(size),
    }
}

/// Builds a grid from rows of `0`/`1`, mostly for tests and fixtures.
pub fn from_bits(rows: &[&[u8]]) -> Grid {
    rows.iter()
        .map(|row| row.iter().map(|&bit| if bit == 0 { CellState::Dead } else { CellState::Alive }).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn empty_grid_has_requested_shape() {
        let grid = make_empty(GridSize::new(3, 4));
        assert_eq!(GridSize::of(&grid), GridSize::new(3, 4));
        assert_eq!(count_alive(&grid), 0);
        assert!(make_empty(GridSize::new(0, 0)).is_empty());
    }

    #[test]
    fn random_grid_respects_probability_extremes() {
        let mut rng = StdRng::seed_from_u64(7);
        let size = GridSize::new(10, 12);
        assert_eq!(count_alive(&make_random_with(size, 1.0, &mut rng)), 120);
        assert_eq!(count_alive(&make_random_with(size, 0.0, &mut rng)), 0);
        assert_eq!(count_alive(&make_random_with(size, 4.5, &mut rng)), 120);
        assert_eq!(count_alive(&make_random_with(size, f64::NAN, &mut rng)), 0);
    }

    #[test]
    fn random_grid_is_roughly_a_third_alive() {
        let mut rng = StdRng::seed_from_u64(42);
        let grid = make_random_with(GridSize::new(100, 100), DEFAULT_ALIVE_PROBABILITY, &mut rng);
        let alive = count_alive(&grid);
        assert!((2800..3800).contains(&alive), "alive = {alive}");
    }

    #[test]
    fn clone_is_independent() {
        let grid = from_bits(&[&[1, 0], &[0, 1]]);
        let mut copy = clone_grid(&grid);
        copy[0][0] = CellState::Dead;
        assert_eq!(grid[0][0], CellState::Alive);
        assert_eq!(GridSize::of(&copy), GridSize::of(&grid));
    }

    #[test]
    fn counts_alive_cells() {
        let grid = from_bits(&[&[1, 1, 0], &[0, 1, 0], &[0, 0, 1]]);
        assert_eq!(count_alive(&grid), 4);
        assert_eq!(count_alive(&[]), 0);
    }

    #[test]
    fn neighbors_exclude_the_cell_itself() {
        let grid = from_bits(&[&[1, 1, 1], &[1, 1, 1], &[1, 1, 1]]);
        assert_eq!(count_neighbors(&grid, CellCoordinate::new(1, 1)), Ok(8));
    }

    #[test]
    fn corners_do_not_wrap() {
        let grid = from_bits(&[&[1, 0, 1], &[0, 0, 0], &[1, 0, 1]]);
        // A toroidal count would see the three other corners.
        assert_eq!(count_neighbors(&grid, CellCoordinate::new(0, 0)), Ok(0));
        assert_eq!(count_neighbors(&grid, CellCoordinate::new(0, 1)), Ok(2));
        assert_eq!(count_neighbors(&grid, CellCoordinate::new(1, 1)), Ok(4));
    }

    #[test]
    fn out_of_range_coordinate_is_rejected() {
        let grid = make_empty(GridSize::new(2, 2));
        let err = count_neighbors(&grid, CellCoordinate::new(2, 0)).unwrap_err();
        assert_eq!(
            err,
            GridError::OutOfBounds { coordinate: CellCoordinate::new(2, 0), size: GridSize::new(2, 2) }
        );
    }

    #[test]
    fn ragged_grid_fails_validation() {
        let grid = from_bits(&[&[1, 0, 0], &[1, 0]]);
        assert_eq!(
            validate_shape(&grid),
            Err(GridError::InvalidShape { row: 1, expected: 3, found: 2 })
        );
        assert_eq!(validate_shape(&[]), Ok(GridSize::new(0, 0)));
    }

    #[test]
    fn cell_state_serializes_as_integer() {
        let json = serde_json::to_string(&vec![CellState::Alive, CellState::Dead]).unwrap();
        assert_eq!(json, "[1,0]");
        assert!(serde_json::from_str::<CellState>("2").is_err());
    }
}
