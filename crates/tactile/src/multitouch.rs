//! Two-finger geometry: distance, midpoint, angle, scale and rotation.

use tactile_core::Point;

use crate::contact::ContactId;
use crate::frame::WidgetFrame;

/// Rotation deltas beyond this many degrees are treated as wraparound.
const WRAP_THRESHOLD_DEGREES: f32 = 170.0;

/// Euclidean distance between two positions.
pub fn distance(a: Point, b: Point) -> f32 {
    a.distance(b)
}

/// Midpoint of two source positions, in widget-local coordinates.
pub fn midpoint(a: Point, b: Point, frame: &WidgetFrame) -> Point {
    frame.to_local(Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0))
}

/// Angle in degrees of the line through two positions, measured as
/// `90 + atan(dx / dy)`.
///
/// Returns `None` when the line is horizontal (`dy == 0`), where the slope
/// used here is undefined.
pub fn angle(a: Point, b: Point) -> Option<f32> {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    if dy == 0.0 {
        return None;
    }
    Some(90.0 + (dx / dy).atan().to_degrees())
}

/// Relative scale from the previous finger distance to the current one.
pub fn scale_ratio(current: f32, previous: f32) -> Option<f32> {
    (previous > 0.0).then(|| current / previous)
}

/// Rotation from the previous angle to the current one, in degrees.
///
/// A line's angle is only defined modulo 180°, so a raw delta past ±170° is
/// folded back by 180° once.
pub fn rotation_delta(previous: f32, current: f32) -> f32 {
    let delta = previous - current;
    if delta > WRAP_THRESHOLD_DEGREES {
        delta - 180.0
    } else if delta < -WRAP_THRESHOLD_DEGREES {
        delta + 180.0
    } else {
        delta
    }
}

/// Change reported by [`TwoFingerTracker::update`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TwoFingerUpdate {
    /// Relative scale since the last update, if it changed.
    pub scale: Option<f32>,
    /// Rotation in degrees since the last update, if it changed.
    pub rotation: Option<f32>,
}

/// Tracks distance and angle between two contacts across updates.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoFingerTracker {
    contacts: Option<[ContactId; 2]>,
    distance: f32,
    angle: Option<f32>,
}

impl TwoFingerTracker {
    /// Start tracking a pair of contacts at the given positions.
    pub fn begin(&mut self, contacts: [ContactId; 2], a: Point, b: Point) {
        self.contacts = Some(contacts);
        self.rebase(a, b);
    }

    /// Take new reference measurements without reporting a change.
    pub fn rebase(&mut self, a: Point, b: Point) {
        self.distance = distance(a, b);
        self.angle = angle(a, b);
    }

    /// The tracked pair, if a two-finger gesture is in progress.
    pub fn contacts(&self) -> Option<[ContactId; 2]> {
        self.contacts
    }

    /// Measure the new positions against the previous ones.
    pub fn update(&mut self, a: Point, b: Point) -> TwoFingerUpdate {
        let current_distance = distance(a, b);
        let scale = scale_ratio(current_distance, self.distance).filter(|s| *s != 1.0);
        self.distance = current_distance;

        let current_angle = angle(a, b);
        let rotation = match (self.angle, current_angle) {
            (Some(previous), Some(current)) => {
                Some(rotation_delta(previous, current)).filter(|r| *r != 0.0)
            }
            _ => None,
        };
        self.angle = current_angle;

        TwoFingerUpdate { scale, rotation }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tactile_core::Rect;

    #[test]
    fn test_distance_and_midpoint() {
        let a = Point::new(110.0, 120.0);
        let b = Point::new(140.0, 160.0);
        let frame = WidgetFrame::new(Rect::new(100.0, 100.0, 100.0, 100.0));

        assert_eq!(distance(a, b), 50.0);
        assert_eq!(midpoint(a, b, &frame), Point::new(25.0, 40.0));
    }

    #[test]
    fn test_angle() {
        // Vertical line.
        assert_eq!(angle(Point::new(0.0, 0.0), Point::new(0.0, 10.0)), Some(90.0));
        // Diagonal line.
        let diagonal = angle(Point::new(0.0, 0.0), Point::new(10.0, 10.0)).unwrap();
        assert!((diagonal - 135.0).abs() < 1e-4);
        // Horizontal line has no usable angle.
        assert_eq!(angle(Point::new(0.0, 5.0), Point::new(10.0, 5.0)), None);
    }

    #[test]
    fn test_rotation_delta_wraps() {
        assert_eq!(rotation_delta(100.0, 90.0), 10.0);
        assert_eq!(rotation_delta(179.0, 1.0), -2.0);
        assert_eq!(rotation_delta(1.0, 179.0), 2.0);
        assert_eq!(rotation_delta(170.0, 0.0), 170.0);
    }

    #[test]
    fn test_scale_ratio() {
        assert_eq!(scale_ratio(150.0, 100.0), Some(1.5));
        assert_eq!(scale_ratio(10.0, 0.0), None);
    }

    #[test]
    fn test_tracker_reports_changes_only() {
        let mut tracker = TwoFingerTracker::default();
        tracker.begin(
            [ContactId(1), ContactId(2)],
            Point::new(0.0, 0.0),
            Point::new(100.0, 100.0),
        );

        let unchanged = tracker.update(Point::new(0.0, 0.0), Point::new(100.0, 100.0));
        assert_eq!(unchanged, TwoFingerUpdate::default());

        let spread = tracker.update(Point::new(0.0, 0.0), Point::new(200.0, 200.0));
        assert_eq!(spread.scale, Some(2.0));
        assert_eq!(spread.rotation, None);

        let turned = tracker.update(Point::new(0.0, 0.0), Point::new(0.0, 200.0));
        assert!(turned.rotation.is_some());
    }

    #[test]
    fn test_tracker_horizontal_line_never_rotates() {
        let mut tracker = TwoFingerTracker::default();
        tracker.begin(
            [ContactId(1), ContactId(2)],
            Point::new(0.0, 50.0),
            Point::new(100.0, 50.0),
        );
        let update = tracker.update(Point::new(0.0, 50.0), Point::new(150.0, 50.0));
        assert_eq!(update.scale, Some(1.5));
        assert_eq!(update.rotation, None);
    }

    proptest! {
        #[test]
        fn rotation_delta_stays_in_range(previous in 0.0f32..180.0, current in 0.0f32..180.0) {
            let delta = rotation_delta(previous, current);
            prop_assert!(delta.abs() <= WRAP_THRESHOLD_DEGREES + 1e-3);
        }

        #[test]
        fn scale_ratios_telescope(steps in proptest::collection::vec(1.0f32..400.0, 2..12)) {
            let mut tracker = TwoFingerTracker::default();
            let first = steps[0];
            tracker.begin([ContactId(1), ContactId(2)], Point::ZERO, Point::new(first, 0.0));

            let mut product = 1.0f64;
            for &d in &steps[1..] {
                if let Some(scale) = tracker.update(Point::ZERO, Point::new(d, 0.0)).scale {
                    product *= f64::from(scale);
                }
            }
            let expected = f64::from(*steps.last().unwrap()) / f64::from(first);
            prop_assert!((product - expected).abs() / expected < 1e-3);
        }
    }
}
