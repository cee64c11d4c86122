// error.rs - Error types for the Game of Life core

use std::path::PathBuf;

use crate::grid::{CellCoordinate, GridSize};

/// Contract violations on grids and coordinates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// A coordinate outside the grid it addresses.
    #[error("cell {coordinate} is outside the {size} grid")]
    OutOfBounds {
        coordinate: CellCoordinate,
        size: GridSize,
    },

    /// A grid whose rows are not all the same length.
    #[error("invalid grid shape: row {row} has {found} cells, expected {expected}")]
    InvalidShape {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Failures while importing a grid from an external representation.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// A plaintext character other than `O`, `.` or a comment line.
    #[error("unexpected character {found:?} at line {line}, column {column}")]
    UnexpectedChar {
        line: usize,
        column: usize,
        found: char,
    },

    /// The declared size disagrees with the cells that follow it.
    #[error("declared size {declared} does not match cells {actual}")]
    SizeMismatch { declared: GridSize, actual: GridSize },

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Failures while loading a [`GameConfig`](crate::config::GameConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
