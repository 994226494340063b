//! Simulated network latency.
//!
//! The storefront has no backend; loads that would be network calls are
//! stand-in delays. [`DelayedFetch`] makes each delay an explicit value: it
//! completes only when polled past its deadline, and it can be cancelled, in
//! which case a late poll is a safe no-op rather than a surprise
//! continuation.

use std::time::Duration;

use crate::clock::Clock;

/// Delay applied to catalog loads.
pub const CATALOG_DELAY: Duration = Duration::from_millis(1000);

/// Delay applied to order lookups.
pub const LOOKUP_DELAY: Duration = Duration::from_millis(1000);

/// Delay between order submission and the hand-off to tracking.
pub const CONFIRMATION_DELAY: Duration = Duration::from_millis(2000);

/// A value that becomes available once a simulated delay has elapsed.
#[derive(Debug)]
pub struct DelayedFetch<T> {
    value: Option<T>,
    ready_at: Duration,
}

impl<T> DelayedFetch<T> {
    /// Schedule `value` to become available `delay` from the clock's now.
    #[must_use]
    pub fn schedule(clock: &impl Clock, delay: Duration, value: T) -> Self {
        DelayedFetch {
            value: Some(value),
            ready_at: clock.now().saturating_add(delay),
        }
    }

    /// Take the value if the deadline has passed and the fetch is still live.
    ///
    /// Yields the value at most once; polling a cancelled or already consumed
    /// fetch returns `None` regardless of the time.
    pub fn poll(&mut self, clock: &impl Clock) -> Option<T> {
        if clock.now() < self.ready_at {
            return None;
        }

        self.value.take()
    }

    /// Drop the scheduled value; every later poll is a no-op.
    pub fn cancel(&mut self) {
        self.value = None;
    }

    /// Whether the fetch can still complete.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.value.is_some()
    }

    /// The instant (past the epoch) at which the value becomes available.
    #[must_use]
    pub fn ready_at(&self) -> Duration {
        self.ready_at
    }
}
