// event.rs - Notifications published by the game to its observers

use serde::Serialize;

use crate::grid::{CellCoordinate, GridSize};

/// Capacity of the broadcast channel; slow subscribers skip older events.
pub const EVENT_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SimulationEvent {
    Started,
    Paused,
    Reset,
    Cleared,
    Stepped { generation: u64 },
    CellToggled { coordinate: CellCoordinate },
    CellPainted { coordinate: CellCoordinate },
    Resized { size: GridSize },
    GridImported { size: GridSize },
    SpeedChanged { tick_ms: u64 },
}
