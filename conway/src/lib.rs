// lib.rs - Conway's Game of Life: grid, simulation, state and timing
//
// Layering, leaf first:
//   grid     - cell/grid types and pure helpers (neighbours, counts)
//   sim      - next-generation transition
//   state    - the store owning grid, size and generation
//   timer    - tokio-driven tick source
//   game     - orchestration used by front ends
// plus controls (UI field parsing), codec (import/export), patterns,
// config and events.

pub mod codec;
pub mod config;
pub mod controls;
pub mod error;
pub mod event;
pub mod game;
pub mod grid;
pub mod patterns;
pub mod sim;
pub mod state;
pub mod timer;

pub use config::GameConfig;
pub use error::{CodecError, ConfigError, GridError};
pub use event::SimulationEvent;
pub use game::GameOfLife;
pub use grid::{CellCoordinate, CellState, Grid, GridSize, Row};
pub use state::{GameState, GameStats, Snapshot};
pub use timer::GameTimer;
