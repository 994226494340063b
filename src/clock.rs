//! Time sources.
//!
//! Order identifiers, saved-address identifiers and simulated fetch deadlines
//! all derive from wall time. The trait seam lets tests substitute a manual
//! clock for deterministic runs.

use std::{
    cell::Cell,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

/// A source of the current time, measured from the Unix epoch.
pub trait Clock {
    /// Current time as a duration since the Unix epoch.
    fn now(&self) -> Duration;

    /// Current time in whole milliseconds since the Unix epoch.
    fn now_millis(&self) -> u128 {
        self.now().as_millis()
    }
}

/// Wall clock backed by [`SystemTime`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        // A system time before the epoch collapses to zero.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
    }
}

/// Clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    /// Create a manual clock positioned `now` past the epoch.
    #[must_use]
    pub fn new(now: Duration) -> Self {
        ManualClock {
            now: Cell::new(now),
        }
    }

    /// Move the clock forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        self.now.set(self.now.get().saturating_add(delta));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}
