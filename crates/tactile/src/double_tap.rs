//! Double-tap detection for platforms that do not flag double taps.

use std::time::Duration;

use tactile_core::{Point, Timestamp};

use crate::contact::Contact;

/// Remembers the last tap candidate and matches the next one against it.
///
/// Taps are compared by their down time and down position, the same moment
/// the single-tap timer is armed at.
#[derive(Debug, Clone, Copy)]
pub struct DoubleTapDetector {
    time: Duration,
    distance: f32,
    last: Option<(Timestamp, Point)>,
}

impl DoubleTapDetector {
    /// Create a detector with the given window and radius.
    pub fn new(time: Duration, distance: f32) -> Self {
        Self {
            time,
            distance,
            last: None,
        }
    }

    /// Whether `contact` completes a double tap with the remembered one.
    ///
    /// A match clears the memory, so a triple tap is one double tap followed
    /// by a fresh candidate.
    pub fn matches(&mut self, contact: &Contact) -> bool {
        let Some((time, position)) = self.last else {
            return false;
        };
        let close_in_time = contact
            .start_time
            .checked_sub(time)
            .is_some_and(|gap| gap <= self.time);
        let close_in_space =
            contact.origin.distance_squared(position) <= self.distance * self.distance;
        if close_in_time && close_in_space {
            self.last = None;
            true
        } else {
            false
        }
    }

    /// Remember `contact` as the candidate for the next match.
    pub fn remember(&mut self, contact: &Contact) {
        self.last = Some((contact.start_time, contact.origin));
    }

    pub fn forget(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tap_at(id: u64, x: f32, y: f32, ms: u64) -> Contact {
        Contact::new(id, Point::new(x, y), Duration::from_millis(ms))
    }

    fn detector() -> DoubleTapDetector {
        DoubleTapDetector::new(Duration::from_millis(250), 20.0)
    }

    #[test]
    fn test_first_tap_never_matches() {
        let mut detector = detector();
        assert!(!detector.matches(&tap_at(1, 10.0, 10.0, 0)));
    }

    #[test]
    fn test_close_second_tap_matches() {
        let mut detector = detector();
        detector.remember(&tap_at(1, 10.0, 10.0, 0));
        assert!(detector.matches(&tap_at(2, 15.0, 12.0, 200)));
        // Memory is cleared after a match.
        assert!(!detector.matches(&tap_at(3, 15.0, 12.0, 220)));
    }

    #[test]
    fn test_slow_second_tap_does_not_match() {
        let mut detector = detector();
        detector.remember(&tap_at(1, 10.0, 10.0, 0));
        assert!(!detector.matches(&tap_at(2, 10.0, 10.0, 300)));
    }

    #[test]
    fn test_distant_second_tap_does_not_match() {
        let mut detector = detector();
        detector.remember(&tap_at(1, 10.0, 10.0, 0));
        assert!(!detector.matches(&tap_at(2, 40.0, 10.0, 100)));
    }

    #[test]
    fn test_forget() {
        let mut detector = detector();
        detector.remember(&tap_at(1, 10.0, 10.0, 0));
        detector.forget();
        assert!(!detector.matches(&tap_at(2, 10.0, 10.0, 50)));
    }
}
