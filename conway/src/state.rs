// state.rs - Authoritative game state: grid, size and generation counter
//
// The grid is held behind an `Arc` and replaced wholesale on every change,
// so a snapshot handed out earlier never observes a later edit.

use std::sync::Arc;

use serde::Serialize;

use crate::config::GameConfig;
use crate::error::GridError;
use crate::grid::{
    CellCoordinate, CellState, DEFAULT_ALIVE_PROBABILITY, Grid, GridSize, clone_grid, count_alive, make_empty,
    make_random, validate_shape,
};
use crate::patterns::Pattern;

/// Consistent view of the store between two operations.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub grid: Arc<Grid>,
    pub size: GridSize,
    pub generation: u64,
    pub alive_count: usize,
}

/// Summary figures shown next to the board.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GameStats {
    pub generation: u64,
    pub alive_count: usize,
    pub grid_size: usize,
    pub density: f64,
}

#[derive(Debug, Clone)]
pub struct GameState {
    size: GridSize,
    grid: Arc<Grid>,
    generation: u64,
    alive_probability: f64,
}

impl GameState {
    /// New store with a random grid of `size`.
    pub fn new(size: GridSize) -> Self {
        Self::with_probability(size, DEFAULT_ALIVE_PROBABILITY)
    }

    pub fn with_config(config: &GameConfig) -> Self {
        Self::with_probability(config.size(), config.alive_probability)
    }

    fn with_probability(size: GridSize, alive_probability: f64) -> Self {
        Self {
            size,
            grid: Arc::new(make_random(size, alive_probability)),
            generation: 0,
            alive_probability,
        }
    }

    /// New store seeded with `grid`, which must be rectangular.
    pub fn with_grid(grid: Grid) -> Result<Self, GridError> {
        let size = validate_shape(&grid)?;
        Ok(Self {
            size,
            grid: Arc::new(grid),
            generation: 0,
            alive_probability: DEFAULT_ALIVE_PROBABILITY,
        })
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn grid(&self) -> Arc<Grid> {
        Arc::clone(&self.grid)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Always recomputed from the current grid.
    pub fn alive_count(&self) -> usize {
        count_alive(&self.grid)
    }

    pub fn cell(&self, coordinate: CellCoordinate) -> Option<CellState> {
        self.grid.get(coordinate.row)?.get(coordinate.col).copied()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: self.grid(),
            size: self.size,
            generation: self.generation,
            alive_count: self.alive_count(),
        }
    }

    pub fn stats(&self) -> GameStats {
        let alive_count = self.alive_count();
        let grid_size = self.size.area();
        let density = if grid_size == 0 { 0.0 } else { alive_count as f64 / grid_size as f64 };
        GameStats {
            generation: self.generation,
            alive_count,
            grid_size,
            density,
        }
    }

    /// Fresh random grid of the current size; generation back to 0.
    pub fn reset(&mut self) {
        self.grid = Arc::new(make_random(self.size, self.alive_probability));
        self.generation = 0;
        log::debug!("reset {}x{} grid", self.size.rows, self.size.cols);
    }

    /// All-dead grid of the current size; generation back to 0.
    pub fn clear(&mut self) {
        self.grid = Arc::new(make_empty(self.size));
        self.generation = 0;
        log::debug!("cleared {}x{} grid", self.size.rows, self.size.cols);
    }

    /// Flips one cell. Out-of-range coordinates are rejected and leave the
    /// state untouched.
    pub fn toggle_cell(&mut self, coordinate: CellCoordinate) -> Result<CellState, GridError> {
        self.replace_cell(coordinate, CellState::toggled)
    }

    /// Sets one cell alive regardless of its current state.
    pub fn drag_set(&mut self, coordinate: CellCoordinate) -> Result<CellState, GridError> {
        self.replace_cell(coordinate, |_| CellState::Alive)
    }

    fn replace_cell(
        &mut self,
        coordinate: CellCoordinate,
        update: impl FnOnce(CellState) -> CellState,
    ) -> Result<CellState, GridError> {
        if !self.size.contains(coordinate) {
            return Err(GridError::OutOfBounds { coordinate, size: self.size });
        }
        let mut next = clone_grid(&self.grid);
        let cell = &mut next[coordinate.row][coordinate.col];
        *cell = update(*cell);
        let updated = *cell;
        self.grid = Arc::new(next);
        Ok(updated)
    }

    /// Adopts `size` and rolls a new random grid for it. A grid without rows
    /// has no columns either, so `0xN` is stored as `0x0`.
    pub fn resize(&mut self, size: GridSize) {
        let size = if size.rows == 0 { GridSize::new(0, 0) } else { size };
        log::info!("resizing grid {}x{} -> {}x{}", self.size.rows, self.size.cols, size.rows, size.cols);
        self.size = size;
        self.reset();
    }

    pub fn increment_generation(&mut self) {
        self.generation += 1;
    }

    /// Publishes a computed next generation and bumps the counter in one go.
    pub fn advance(&mut self, next: Grid) {
        debug_assert_eq!(GridSize::of(&next), GridSize::of(&self.grid));
        self.grid = Arc::new(next);
        self.increment_generation();
    }

    /// Centres `pattern` on an empty grid of the current size; generation
    /// back to 0.
    pub fn load_pattern(&mut self, pattern: &Pattern) -> GridSize {
        self.grid = Arc::new(pattern.to_grid(self.size));
        self.generation = 0;
        log::info!("loaded pattern {} on {}x{} grid", pattern.name, self.size.rows, self.size.cols);
        self.size
    }

    /// Replaces the grid with an externally supplied one, adopting its
    /// dimensions. Ragged grids are rejected.
    pub fn set_grid(&mut self, grid: Grid) -> Result<(), GridError> {
        let size = validate_shape(&grid)?;
        self.size = size;
        self.grid = Arc::new(grid);
        self.generation = 0;
        log::info!("grid replaced with {}x{}", size.rows, size.cols);
        Ok(())
    }
}
