//! Device-independent velocity.
//!
//! Velocities are in inches per second: pixel distances divided by the
//! display's dots-per-inch, so thresholds mean the same on every screen.

use std::time::Duration;

use tactile_core::{Point, Timestamp};

/// Convert a pixel distance covered in `elapsed` into inches per second.
///
/// Returns 0 when no time elapsed or the dpi is unusable.
pub fn inches_per_second(distance: f32, elapsed: Duration, dpi: f32) -> f32 {
    if elapsed.is_zero() || dpi <= 0.0 {
        return 0.0;
    }
    distance / (elapsed.as_secs_f32() * dpi)
}

/// Instantaneous speed of a moving contact.
///
/// Each sample measures from the previous sample only; there is no averaging
/// window.
#[derive(Debug, Clone, Copy)]
pub struct VelocityTracker {
    dpi: f32,
    last: Option<(Point, Timestamp)>,
}

impl VelocityTracker {
    /// Create a tracker for a display with the given dots-per-inch.
    pub fn new(dpi: f32) -> Self {
        Self { dpi, last: None }
    }

    /// Begin tracking from a contact's origin.
    pub fn start(&mut self, origin: Point, start_time: Timestamp) {
        self.last = Some((origin, start_time));
    }

    /// Speed from the previous sample to this one, in inches per second.
    ///
    /// Without a previous sample this only records the position and returns 0.
    pub fn sample(&mut self, position: Point, time: Timestamp) -> f32 {
        let velocity = match self.last {
            Some((last_position, last_time)) => inches_per_second(
                last_position.distance(position),
                time.saturating_sub(last_time),
                self.dpi,
            ),
            None => 0.0,
        };
        self.last = Some((position, time));
        velocity
    }

    /// Forget the last sample.
    pub fn clear(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_inches_per_second() {
        // 96 px at 96 dpi in half a second is two inches per second.
        assert!((inches_per_second(96.0, ms(500), 96.0) - 2.0).abs() < 1e-6);
        assert_eq!(inches_per_second(96.0, Duration::ZERO, 96.0), 0.0);
        assert_eq!(inches_per_second(96.0, ms(10), 0.0), 0.0);
    }

    #[test]
    fn test_sample_is_instantaneous() {
        let mut tracker = VelocityTracker::new(100.0);
        tracker.start(Point::new(0.0, 0.0), ms(0));

        // 100 px in 100 ms at 100 dpi: 10 in/s.
        let v1 = tracker.sample(Point::new(100.0, 0.0), ms(100));
        assert!((v1 - 10.0).abs() < 1e-4);

        // Only the last step counts: 10 px in 100 ms is 1 in/s.
        let v2 = tracker.sample(Point::new(110.0, 0.0), ms(200));
        assert!((v2 - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_zero_elapsed_sample() {
        let mut tracker = VelocityTracker::new(100.0);
        tracker.start(Point::ZERO, ms(50));
        assert_eq!(tracker.sample(Point::new(30.0, 40.0), ms(50)), 0.0);
        // The sample still became the new reference.
        let v = tracker.sample(Point::new(30.0, 40.0), ms(60));
        assert_eq!(v, 0.0);
    }

    #[test]
    fn test_sample_without_start() {
        let mut tracker = VelocityTracker::new(100.0);
        assert_eq!(tracker.sample(Point::new(5.0, 5.0), ms(10)), 0.0);
        assert!(tracker.sample(Point::new(15.0, 5.0), ms(20)) > 0.0);
        tracker.clear();
        assert_eq!(tracker.sample(Point::new(15.0, 5.0), ms(30)), 0.0);
    }

    proptest! {
        #[test]
        fn velocity_is_never_negative_or_nan(
            x in -1000.0f32..1000.0,
            y in -1000.0f32..1000.0,
            dt in 0u64..1000,
        ) {
            let mut tracker = VelocityTracker::new(160.0);
            tracker.start(Point::ZERO, ms(0));
            let v = tracker.sample(Point::new(x, y), ms(dt));
            prop_assert!(v.is_finite());
            prop_assert!(v >= 0.0);
        }
    }
}
