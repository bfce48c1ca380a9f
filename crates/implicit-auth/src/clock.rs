//! Wall-clock capability
//!
//! Timestamps are milliseconds as `f64`, so they format and parse the same
//! way as the expiry stored alongside each token.

use std::cell::Cell;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the current time in milliseconds since a fixed epoch.
pub trait Clock {
    fn now(&self) -> f64;
}

/// Clock backed by the system time (milliseconds since the Unix epoch).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as f64
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(now: f64) -> Self {
        Self { now: Cell::new(now) }
    }

    pub fn set(&self, now: f64) {
        self.now.set(now);
    }

    /// Move the clock forward by `millis`.
    pub fn advance(&self, millis: f64) {
        self.now.set(self.now.get() + millis);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}
