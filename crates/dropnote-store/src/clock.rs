//! Injectable time source.
//!
//! Expiry decisions compare wall-clock timestamps, so tests need to
//! *set* the clock, not wait on it. Everything that reads time takes a
//! [`Clock`] collaborator instead of calling `SystemTime::now()`
//! directly.

use std::sync::Mutex;
use std::time::{Duration, SystemTime};

/// A source of the current wall-clock time.
pub trait Clock: Send + Sync {
    /// The current time.
    fn now(&self) -> SystemTime;
}

/// The production clock: the system's real time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// A settable clock for tests.
///
/// Starts at a fixed instant and only moves when told to, so a test
/// can create a room, jump 61 minutes, and watch it expire — all in
/// microseconds of real time.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<SystemTime>,
}

impl ManualClock {
    /// Creates a clock frozen at `start`.
    pub fn new(start: SystemTime) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Moves the clock forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        let mut now = self.now.lock().expect("clock lock poisoned");
        *now += delta;
    }

    /// Sets the clock to an absolute instant.
    pub fn set(&self, to: SystemTime) {
        *self.now.lock().expect("clock lock poisoned") = to;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> SystemTime {
        *self.now.lock().expect("clock lock poisoned")
    }
}
