// game.rs - Wires the timer, state store and simulation together
//
// Lock order: a tick holds the timer's firing gate and then takes the state
// lock. Methods here therefore never call into the timer while holding the
// state lock.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::runtime::Handle;
use tokio::sync::broadcast;

use crate::codec::{self, GridFormat};
use crate::config::GameConfig;
use crate::error::{CodecError, GridError};
use crate::event::{EVENT_CHANNEL_CAPACITY, SimulationEvent};
use crate::grid::{CellCoordinate, CellState, Grid, GridSize};
use crate::patterns::Pattern;
use crate::sim;
use crate::state::{GameState, GameStats, Snapshot};
use crate::timer::{GameTimer, TickCallback};

fn lock(state: &Mutex<GameState>) -> MutexGuard<'_, GameState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Computes and publishes one generation; returns the new generation number.
fn advance(state: &Mutex<GameState>, events: &broadcast::Sender<SimulationEvent>) -> u64 {
    let generation = {
        let mut state = lock(state);
        let next = sim::step(&state.grid());
        state.advance(next);
        state.generation()
    };
    log::debug!("generation {generation}");
    // No subscribers is fine.
    let _ = events.send(SimulationEvent::Stepped { generation });
    generation
}

pub struct GameOfLife {
    state: Arc<Mutex<GameState>>,
    timer: GameTimer,
    events: broadcast::Sender<SimulationEvent>,
}

impl GameOfLife {
    /// Builds the game and registers `step` as the tick action, so a config
    /// with `running = true` starts advancing straight away.
    pub fn new(runtime: Handle, config: &GameConfig) -> Self {
        Self::with_state(runtime, config, GameState::with_config(config))
    }

    pub fn with_state(runtime: Handle, config: &GameConfig, state: GameState) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let game = Self {
            state: Arc::new(Mutex::new(state)),
            timer: GameTimer::with_config(runtime, config),
            events,
        };
        game.set_on_tick(None);
        log::info!(
            "game ready: {}x{}, {} ms, running = {}",
            config.rows,
            config.cols,
            game.timer.tick_ms(),
            game.timer.running()
        );
        game
    }

    /// Installs the tick action, with `hook` invoked after every timer-driven
    /// step (a front end uses it to schedule a repaint).
    pub fn set_on_tick(&self, hook: Option<TickCallback>) {
        let state = Arc::clone(&self.state);
        let events = self.events.clone();
        self.timer.set_callback(Arc::new(move || {
            advance(&state, &events);
            if let Some(hook) = &hook {
                hook();
            }
        }));
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SimulationEvent> {
        self.events.subscribe()
    }

    fn emit(&self, event: SimulationEvent) {
        let _ = self.events.send(event);
    }

    // -- timer controls ----------------------------------------------------

    pub fn running(&self) -> bool {
        self.timer.running()
    }

    pub fn tick_ms(&self) -> u64 {
        self.timer.tick_ms()
    }

    pub fn toggle_running(&self) -> bool {
        let running = self.timer.toggle_running();
        log::info!("simulation {}", if running { "started" } else { "paused" });
        self.emit(if running { SimulationEvent::Started } else { SimulationEvent::Paused });
        running
    }

    pub fn start(&self) {
        self.timer.start();
        self.emit(SimulationEvent::Started);
    }

    pub fn stop(&self) {
        self.timer.stop();
        self.emit(SimulationEvent::Paused);
    }

    /// Returns the period actually applied after clamping.
    pub fn set_speed(&self, ms: u64) -> u64 {
        let tick_ms = self.timer.set_speed(ms);
        if tick_ms != ms {
            log::warn!("speed {ms} ms clamped to {tick_ms} ms");
        }
        self.emit(SimulationEvent::SpeedChanged { tick_ms });
        tick_ms
    }

    // -- state -------------------------------------------------------------

    pub fn step(&self) -> u64 {
        advance(&self.state, &self.events)
    }

    pub fn reset(&self) {
        lock(&self.state).reset();
        self.emit(SimulationEvent::Reset);
    }

    /// Stops the timer, then empties the board. Subscribers see `Paused`
    /// before `Cleared` when the simulation was running.
    pub fn clear(&self) {
        if self.timer.stop() {
            log::info!("simulation paused");
            self.emit(SimulationEvent::Paused);
        }
        lock(&self.state).clear();
        log::info!("board cleared");
        self.emit(SimulationEvent::Cleared);
    }

    /// Returns the size actually adopted.
    pub fn resize(&self, size: GridSize) -> GridSize {
        let size = {
            let mut state = lock(&self.state);
            state.resize(size);
            state.size()
        };
        self.emit(SimulationEvent::Resized { size });
        size
    }

    pub fn toggle_cell(&self, coordinate: CellCoordinate) -> Result<CellState, GridError> {
        let cell = lock(&self.state).toggle_cell(coordinate).inspect_err(|err| log::warn!("toggle ignored: {err}"))?;
        self.emit(SimulationEvent::CellToggled { coordinate });
        Ok(cell)
    }

    pub fn drag_set(&self, coordinate: CellCoordinate) -> Result<CellState, GridError> {
        let cell = lock(&self.state).drag_set(coordinate).inspect_err(|err| log::warn!("paint ignored: {err}"))?;
        self.emit(SimulationEvent::CellPainted { coordinate });
        Ok(cell)
    }

    pub fn set_grid(&self, grid: Grid) -> Result<GridSize, GridError> {
        let size = {
            let mut state = lock(&self.state);
            state.set_grid(grid)?;
            state.size()
        };
        self.emit(SimulationEvent::GridImported { size });
        Ok(size)
    }

    /// Centres `pattern` on an empty board of the current size.
    pub fn load_pattern(&self, pattern: &Pattern) -> GridSize {
        let size = lock(&self.state).load_pattern(pattern);
        self.emit(SimulationEvent::GridImported { size });
        size
    }

    pub fn import(&self, text: &str, format: GridFormat) -> Result<GridSize, CodecError> {
        let grid = codec::import(text, format)?;
        Ok(self.set_grid(grid)?)
    }

    pub fn export(&self, format: GridFormat) -> Result<String, CodecError> {
        let grid = self.grid();
        codec::export(&grid, format)
    }

    // -- queries -----------------------------------------------------------

    pub fn grid(&self) -> Arc<Grid> {
        lock(&self.state).grid()
    }

    pub fn size(&self) -> GridSize {
        lock(&self.state).size()
    }

    pub fn generation(&self) -> u64 {
        lock(&self.state).generation()
    }

    pub fn alive_count(&self) -> usize {
        lock(&self.state).alive_count()
    }

    pub fn stats(&self) -> GameStats {
        lock(&self.state).stats()
    }

    pub fn snapshot(&self) -> Snapshot {
        lock(&self.state).snapshot()
    }
}
