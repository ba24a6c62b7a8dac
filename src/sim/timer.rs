//! Repeating tick timers
//!
//! A [`RepeatingTimer`] is owned by whatever it drives (a flight, an explosion).
//! Stopping it consumes it, so a timer can be stopped once and only once, and
//! dropping its owner takes the timer with it.

use serde::Serialize;

/// Most intervals a single `advance` will report
pub const MAX_CATCHUP: u32 = 1024;

/// Fixed-interval timer fed by the simulation clock
#[derive(Debug, Serialize)]
pub struct RepeatingTimer {
    interval: f32,
    accumulator: f32,
    fired: u32,
}

impl RepeatingTimer {
    /// `interval` is in seconds and must be positive
    pub fn start(interval: f32) -> Self {
        debug_assert!(interval > 0.0, "timer interval must be positive");
        log::trace!("timer started ({}s)", interval);
        Self {
            interval,
            accumulator: 0.0,
            fired: 0,
        }
    }

    /// Add elapsed time, returning how many intervals completed.
    ///
    /// At most [`MAX_CATCHUP`] intervals fire per call. Time beyond that is
    /// dropped, as are negative and NaN `dt`.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.max(0.0);
        let whole = (self.accumulator / self.interval).floor();
        if whole < 1.0 {
            return 0;
        }
        let due = if whole >= MAX_CATCHUP as f32 {
            log::debug!("timer fell {} intervals behind, dropping the backlog", whole);
            self.accumulator = 0.0;
            MAX_CATCHUP
        } else {
            self.accumulator = (self.accumulator - whole * self.interval).max(0.0);
            whole as u32
        };
        self.fired = self.fired.saturating_add(due);
        due
    }

    /// Total intervals fired so far
    pub fn fired(&self) -> u32 {
        self.fired
    }

    /// Stop the timer. Returns the total number of ticks it fired.
    pub fn stop(self) -> u32 {
        log::trace!("timer stopped after {} ticks", self.fired);
        self.fired
    }
}
