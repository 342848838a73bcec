//! Recognizer states and timer payloads.

use tactile_core::Point;

use crate::contact::ContactId;

/// Where the recognizer is in classifying the current gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GestureState {
    /// Nothing tracked.
    #[default]
    Idle,
    /// One contact down, waiting for it to become a tap, double tap or long press.
    PrimaryCandidate,
    /// A secondary click, or two contacts down that have not moved yet.
    SecondaryCandidate,
    /// The contact moved; it is either a swipe or a move.
    Disambiguate,
    Move,
    /// The contact stayed put long enough.
    LongPressed,
    LongPressMove,
    /// Two contacts moving.
    Scale,
    /// A wheel tick delivered as a contact.
    Wheel,
}

/// What a recognizer timer is for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimerPurpose {
    LongPress(ContactId),
    /// `position` is the down position in source coordinates.
    SingleTap {
        contact: ContactId,
        position: Point,
    },
    Swipe(ContactId),
}
