// sim.rs - Generation transition for Conway's Game of Life
//
// Every cell of the next generation is computed against the same input
// grid; the input is never written to.

use crate::grid::{CellState, Grid, GridSize, Row, live_neighbors};

/// Next state of one cell given its current state and live neighbour count.
pub fn apply_rules(cell: CellState, neighbors: u8) -> CellState {
    match (cell, neighbors) {
        (CellState::Alive, 2) | (CellState::Alive, 3) => CellState::Alive, // Survival
        (CellState::Dead, 3)                          => CellState::Alive, // Birth
        _                                             => CellState::Dead,  // Under/overpopulation or stays dead
    }
}

/// Computes one row of the next generation.
fn next_row(grid: &[Row], size: GridSize, row: usize) -> Row {
    (0..size.cols)
        .map(|col| apply_rules(grid[row][col], live_neighbors(grid, size, row, col)))
        .collect()
}

/// Returns the next generation of `grid` with the same dimensions.
///
/// The caller guarantees `grid` is rectangular.
pub fn step(grid: &[Row]) -> Grid {
    let size = GridSize::of(grid);
    (0..size.rows).map(|row| next_row(grid, size, row)).collect()
}
