//! Monotonic time sources.
//!
//! Every timestamp in Tactile is a [`Timestamp`]: the elapsed time since the
//! host clock's origin. Contact events carry timestamps taken from the same
//! clock the host uses to fire timers.

use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Elapsed time since a clock's origin.
pub type Timestamp = Duration;

/// A monotonic time source.
pub trait Clock {
    /// The current time. Never decreases.
    fn now(&self) -> Timestamp;
}

/// A clock backed by [`Instant`], with its origin at construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Create a clock whose origin is now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    /// Convert an instant observed by the host into a timestamp on this clock.
    ///
    /// Instants before the origin saturate to zero.
    pub fn timestamp_of(&self, instant: Instant) -> Timestamp {
        instant.saturating_duration_since(self.origin)
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Timestamp {
        self.origin.elapsed()
    }
}

/// A clock that only moves when told to.
///
/// Used for deterministic tests and for replaying recorded input.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Mutex<Timestamp>,
}

impl ManualClock {
    /// Create a clock at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock at the given time.
    pub fn starting_at(now: Timestamp) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Move the clock forward by `delta`.
    pub fn advance(&self, delta: Duration) -> Timestamp {
        let mut now = self.now.lock();
        *now += delta;
        *now
    }

    /// Move the clock to `time`. Earlier times are ignored.
    pub fn set(&self, time: Timestamp) {
        let mut now = self.now.lock();
        if time > *now {
            *now = time;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.now.lock()
    }
}

static_assertions::assert_impl_all!(ManualClock: Send, Sync);
static_assertions::assert_impl_all!(MonotonicClock: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::new();
        assert_eq!(clock.now(), Duration::ZERO);
        assert_eq!(clock.advance(Duration::from_millis(16)), Duration::from_millis(16));
        assert_eq!(clock.now(), Duration::from_millis(16));
    }

    #[test]
    fn test_manual_clock_is_monotonic() {
        let clock = ManualClock::starting_at(Duration::from_secs(2));
        clock.set(Duration::from_secs(1));
        assert_eq!(clock.now(), Duration::from_secs(2));
        clock.set(Duration::from_secs(3));
        assert_eq!(clock.now(), Duration::from_secs(3));
    }

    #[test]
    fn test_monotonic_clock_timestamp_of() {
        let clock = MonotonicClock::new();
        let later = Instant::now() + Duration::from_millis(5);
        assert!(clock.timestamp_of(later) >= Duration::from_millis(5));
        assert!(clock.now() <= clock.now());
    }
}
