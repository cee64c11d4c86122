// timer.rs - Periodic tick source driving the simulation
//
// The timer is a small state machine: either Stopped, or Running with one
// spawned interval task. Every transition cancels the current task before
// (maybe) spawning a new one, and bumps an epoch that the task re-checks
// right before firing. A separate firing gate is held for the length of
// each callback and by every transition, so once `stop()` returns no
// further callback can run. The state lock is released before the callback
// is invoked, which keeps `running()` and `tick_ms()` responsive during a
// long step. The callback must not start, stop or reschedule the timer.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use crate::config::GameConfig;

pub const MIN_TICK_MS: u64 = 10;
pub const MAX_TICK_MS: u64 = 5000;
pub const DEFAULT_TICK_MS: u64 = 200;

pub type TickCallback = Arc<dyn Fn() + Send + Sync>;

pub fn clamp_tick_ms(ms: u64) -> u64 {
    ms.clamp(MIN_TICK_MS, MAX_TICK_MS)
}

enum Schedule {
    Stopped,
    Running(JoinHandle<()>),
}

struct TimerInner {
    tick_ms: u64,
    running: bool,
    callback: Option<TickCallback>,
    schedule: Schedule,
    epoch: u64,
}

pub struct GameTimer {
    inner: Arc<Mutex<TimerInner>>,
    firing: Arc<Mutex<()>>,
    runtime: Handle,
}

fn lock_gate(gate: &Mutex<()>) -> MutexGuard<'_, ()> {
    gate.lock().unwrap_or_else(PoisonError::into_inner)
}

impl GameTimer {
    /// Timer with the default 200 ms period, already in the running state.
    pub fn new(runtime: Handle) -> Self {
        Self::with_settings(runtime, DEFAULT_TICK_MS, true)
    }

    pub fn with_config(runtime: Handle, config: &GameConfig) -> Self {
        Self::with_settings(runtime, config.tick_ms, config.running)
    }

    fn with_settings(runtime: Handle, tick_ms: u64, running: bool) -> Self {
        Self {
            inner: Arc::new(Mutex::new(TimerInner {
                tick_ms: clamp_tick_ms(tick_ms),
                running,
                callback: None,
                schedule: Schedule::Stopped,
                epoch: 0,
            })),
            firing: Arc::new(Mutex::new(())),
            runtime,
        }
    }

    fn lock(&self) -> MutexGuard<'_, TimerInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn tick_ms(&self) -> u64 {
        self.lock().tick_ms
    }

    pub fn running(&self) -> bool {
        self.lock().running
    }

    /// Whether an interval task is currently armed.
    pub fn is_scheduled(&self) -> bool {
        matches!(self.lock().schedule, Schedule::Running(_))
    }

    /// Registers the per-tick action, replacing any previous one.
    pub fn set_callback(&self, callback: TickCallback) {
        let _gate = lock_gate(&self.firing);
        let mut inner = self.lock();
        inner.callback = Some(callback);
        self.reschedule(&mut inner);
    }

    pub fn start(&self) {
        self.set_running(true);
    }

    /// Returns whether the timer was running before the call.
    pub fn stop(&self) -> bool {
        self.set_running(false)
    }

    /// Flips the running state and returns the new value.
    pub fn toggle_running(&self) -> bool {
        let _gate = lock_gate(&self.firing);
        let mut inner = self.lock();
        inner.running = !inner.running;
        self.reschedule(&mut inner);
        inner.running
    }

    fn set_running(&self, running: bool) -> bool {
        let _gate = lock_gate(&self.firing);
        let mut inner = self.lock();
        let was_running = std::mem::replace(&mut inner.running, running);
        self.reschedule(&mut inner);
        was_running
    }

    /// Sets the period, clamped to `[MIN_TICK_MS, MAX_TICK_MS]`, and restarts
    /// the interval from zero. Returns the clamped value.
    pub fn set_speed(&self, ms: u64) -> u64 {
        let _gate = lock_gate(&self.firing);
        let mut inner = self.lock();
        inner.tick_ms = clamp_tick_ms(ms);
        self.reschedule(&mut inner);
        inner.tick_ms
    }

    fn reschedule(&self, inner: &mut TimerInner) {
        inner.epoch += 1;
        if let Schedule::Running(handle) = std::mem::replace(&mut inner.schedule, Schedule::Stopped) {
            handle.abort();
        }

        let Some(callback) = inner.callback.clone().filter(|_| inner.running) else {
            log::debug!("timer stopped");
            return;
        };

        let epoch = inner.epoch;
        let period = Duration::from_millis(inner.tick_ms);
        let first_tick = Instant::now() + period;
        let shared = Arc::clone(&self.inner);
        let firing = Arc::clone(&self.firing);
        let handle = self.runtime.spawn(async move {
            let mut interval = interval_at(first_tick, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let _gate = lock_gate(&firing);
                let current = shared.lock().unwrap_or_else(PoisonError::into_inner).epoch;
                if current != epoch {
                    break;
                }
                callback();
            }
        });
        inner.schedule = Schedule::Running(handle);
        log::debug!("timer armed at {} ms", inner.tick_ms);
    }
}

impl Drop for GameTimer {
    fn drop(&mut self) {
        let _gate = lock_gate(&self.firing);
        let mut inner = self.lock();
        inner.epoch += 1;
        if let Schedule::Running(handle) = std::mem::replace(&mut inner.schedule, Schedule::Stopped) {
            handle.abort();
        }
    }
}
