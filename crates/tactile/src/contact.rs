//! Contacts: one finger or pointer from down to up.

use tactile_core::{Point, Timestamp};

/// Identity of a contact, as assigned by the host platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContactId(pub u64);

impl From<u64> for ContactId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Direction of a discrete scroll tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Up,
    Down,
    Left,
    Right,
}

impl ScrollDirection {
    /// Whether this is a vertical tick.
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }

    /// `-1.0` for Up and Left, `1.0` for Down and Right.
    pub fn sign(self) -> f32 {
        match self {
            Self::Up | Self::Left => -1.0,
            Self::Down | Self::Right => 1.0,
        }
    }
}

/// The button that produced a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContactButton {
    /// A finger or pen, no button.
    #[default]
    None,
    /// Primary (usually left) mouse button.
    Primary,
    /// Secondary (usually right) mouse button.
    Secondary,
    ScrollUp,
    ScrollDown,
    ScrollLeft,
    ScrollRight,
}

impl ContactButton {
    /// The scroll direction for wheel buttons.
    pub fn scroll_direction(self) -> Option<ScrollDirection> {
        match self {
            Self::ScrollUp => Some(ScrollDirection::Up),
            Self::ScrollDown => Some(ScrollDirection::Down),
            Self::ScrollLeft => Some(ScrollDirection::Left),
            Self::ScrollRight => Some(ScrollDirection::Right),
            _ => None,
        }
    }
}

/// The input device behind a contact.
///
/// Some platforms emulate a mouse pointer for every touch. Those emulated
/// contacts arrive as `Mouse` while real fingers are `Touch`, which is how the
/// registry recognizes them as noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContactSource {
    #[default]
    Touch,
    Mouse,
    Pen,
}

/// A tracked contact.
///
/// Positions are in the host's source coordinates; the recognizer converts
/// them into widget-local coordinates through its [`WidgetFrame`](crate::WidgetFrame).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Contact {
    pub id: ContactId,
    /// Last reported position.
    pub position: Point,
    /// Position at contact-down.
    pub origin: Point,
    /// Time of contact-down.
    pub start_time: Timestamp,
    /// Time of the last report.
    pub update_time: Timestamp,
    pub button: ContactButton,
    pub source: ContactSource,
    /// The contact is a wheel tick delivered as a down/up pair.
    pub is_scroll: bool,
}

impl Contact {
    /// A touch contact going down at `position`.
    pub fn new(id: u64, position: Point, time: Timestamp) -> Self {
        Self {
            id: ContactId(id),
            position,
            origin: position,
            start_time: time,
            update_time: time,
            button: ContactButton::None,
            source: ContactSource::Touch,
            is_scroll: false,
        }
    }

    /// A mouse contact going down with `button`.
    pub fn mouse(
        id: u64,
        position: Point,
        time: Timestamp,
        button: ContactButton,
    ) -> Self {
        Self::new(id, position, time)
            .with_source(ContactSource::Mouse)
            .with_button(button)
    }

    /// A wheel tick delivered as a contact.
    pub fn scroll(
        id: u64,
        position: Point,
        time: Timestamp,
        direction: ScrollDirection,
    ) -> Self {
        let button = match direction {
            ScrollDirection::Up => ContactButton::ScrollUp,
            ScrollDirection::Down => ContactButton::ScrollDown,
            ScrollDirection::Left => ContactButton::ScrollLeft,
            ScrollDirection::Right => ContactButton::ScrollRight,
        };
        Self::mouse(id, position, time, button)
    }

    /// Set the button. Wheel buttons also mark the contact as a scroll.
    pub fn with_button(mut self, button: ContactButton) -> Self {
        self.button = button;
        self.is_scroll = button.scroll_direction().is_some();
        self
    }

    /// Set the input device.
    pub fn with_source(mut self, source: ContactSource) -> Self {
        self.source = source;
        self
    }

    /// Displacement since contact-down.
    pub fn displacement(&self) -> Point {
        self.position - self.origin
    }

    /// Time elapsed between contact-down and the last report.
    pub fn elapsed(&self) -> std::time::Duration {
        self.update_time.saturating_sub(self.start_time)
    }

    /// Whether the contact moved further horizontally than vertically.
    pub fn is_horizontal(&self) -> bool {
        let d = self.displacement();
        d.x.abs() > d.y.abs()
    }

    /// Whether the contact moved further vertically than horizontally.
    pub fn is_vertical(&self) -> bool {
        let d = self.displacement();
        d.y.abs() > d.x.abs()
    }
}

/// A move or up report for an already tracked contact.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContactUpdate {
    pub id: ContactId,
    pub position: Point,
    pub time: Timestamp,
    /// Platform verdict on whether this up completes a double tap.
    ///
    /// `None` lets the recognizer decide with its own detector.
    pub is_double_tap: Option<bool>,
}

impl ContactUpdate {
    /// A report without a platform double-tap verdict.
    pub fn new(id: u64, position: Point, time: Timestamp) -> Self {
        Self {
            id: ContactId(id),
            position,
            time,
            is_double_tap: None,
        }
    }

    /// Attach the platform's double-tap verdict.
    pub fn with_double_tap(mut self, is_double_tap: bool) -> Self {
        self.is_double_tap = Some(is_double_tap);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_scroll_contact_sets_flag() {
        let contact = Contact::scroll(1, Point::ZERO, Duration::ZERO, ScrollDirection::Left);
        assert!(contact.is_scroll);
        assert_eq!(contact.source, ContactSource::Mouse);
        assert_eq!(contact.button.scroll_direction(), Some(ScrollDirection::Left));
    }

    #[test]
    fn test_plain_button_is_not_scroll() {
        let contact = Contact::mouse(1, Point::ZERO, Duration::ZERO, ContactButton::Secondary);
        assert!(!contact.is_scroll);
    }

    #[test]
    fn test_direction_helpers() {
        let mut contact = Contact::new(7, Point::new(10.0, 10.0), Duration::from_millis(5));
        contact.position = Point::new(40.0, 20.0);
        contact.update_time = Duration::from_millis(25);

        assert!(contact.is_horizontal());
        assert!(!contact.is_vertical());
        assert_eq!(contact.displacement(), Point::new(30.0, 10.0));
        assert_eq!(contact.elapsed(), Duration::from_millis(20));
    }

    #[test]
    fn test_scroll_direction_sign() {
        assert_eq!(ScrollDirection::Up.sign(), -1.0);
        assert_eq!(ScrollDirection::Right.sign(), 1.0);
        assert!(ScrollDirection::Down.is_vertical());
        assert!(!ScrollDirection::Left.is_vertical());
    }
}
