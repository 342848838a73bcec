//! Widget frame and persistent contact positions.

use tactile_core::{Point, Rect, Size};

/// The widget a recognizer is attached to, as seen from the host.
///
/// Local coordinates are source coordinates minus the anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WidgetFrame {
    anchor: Point,
    /// `None` accepts every position.
    size: Option<Size>,
}

impl WidgetFrame {
    /// A frame covering `bounds`, anchored at its origin.
    pub fn new(bounds: Rect) -> Self {
        Self {
            anchor: bounds.origin,
            size: Some(bounds.size),
        }
    }

    /// A frame that accepts every position and has its anchor at `anchor`.
    pub fn unbounded(anchor: Point) -> Self {
        Self { anchor, size: None }
    }

    /// The anchor offset.
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// The widget bounds, if limited.
    pub fn bounds(&self) -> Option<Rect> {
        self.size
            .map(|size| Rect::from_origin_size(self.anchor, size))
    }

    /// Whether the widget contains a source position.
    pub fn contains(&self, point: Point) -> bool {
        self.bounds().is_none_or(|bounds| bounds.contains(point))
    }

    /// Convert a source position into widget-local coordinates.
    pub fn to_local(&self, point: Point) -> Point {
        point - self.anchor
    }
}

impl Default for WidgetFrame {
    fn default() -> Self {
        Self::unbounded(Point::ZERO)
    }
}

/// Source positions of the tracked contacts, indexed by arrival order.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PersistentPositions {
    slots: [Point; 2],
}

impl PersistentPositions {
    /// Record the position of the contact at `index`. Indices past 1 are ignored.
    pub fn set(&mut self, index: usize, point: Point) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = point;
        }
    }

    /// The position recorded at `index`.
    pub fn get(&self, index: usize) -> Option<Point> {
        self.slots.get(index).copied()
    }

    /// Both recorded positions.
    pub fn pair(&self) -> (Point, Point) {
        (self.slots[0], self.slots[1])
    }

    /// Replace both positions.
    pub fn reseed(&mut self, first: Point, second: Point) {
        self.slots = [first, second];
    }

    pub fn clear(&mut self) {
        self.slots = [Point::ZERO; 2];
    }
}
