//! Gesture events.
//!
//! Every recognized gesture is delivered as a [`GestureEvent`]. Events come in
//! two layers: the raw gesture (`Tap`, `MoveTo`, `ScaleTo`, ...) and the
//! behavioral meaning that follows it (`Primary`, `Scroll`, `Zoom`, ...).
//! Handlers usually implement one layer and ignore the other.
//!
//! Positions are widget-local.

use tactile_core::Point;

use crate::contact::ContactId;

/// A recognized gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GestureEvent {
    // Raw gestures.
    Tap {
        contact: ContactId,
        position: Point,
    },
    DoubleTap {
        contact: ContactId,
        position: Point,
    },
    TwoFingerTap {
        contact: ContactId,
        position: Point,
    },
    LongPress {
        contact: ContactId,
        position: Point,
    },
    LongPressEnd {
        contact: ContactId,
        position: Point,
    },
    MoveStart {
        contact: ContactId,
        position: Point,
    },
    /// `velocity` is in inches per second.
    MoveTo {
        contact: ContactId,
        position: Point,
        velocity: f32,
    },
    MoveEnd {
        contact: ContactId,
        position: Point,
    },
    LongPressMoveStart {
        contact: ContactId,
        position: Point,
    },
    LongPressMoveTo {
        contact: ContactId,
        position: Point,
        velocity: f32,
    },
    LongPressMoveEnd {
        contact: ContactId,
        position: Point,
    },
    SwipeHorizontal {
        contact: ContactId,
        left_to_right: bool,
    },
    /// `bottom_to_top` is true when the contact moved toward increasing y.
    SwipeVertical {
        contact: ContactId,
        bottom_to_top: bool,
    },
    ScaleStart {
        contacts: [ContactId; 2],
        focus: Point,
    },
    /// `scale` is relative to the previous `ScaleTo`.
    ScaleTo {
        contacts: [ContactId; 2],
        scale: f32,
        focus: Point,
    },
    ScaleEnd {
        contacts: [ContactId; 2],
    },
    Wheel {
        position: Point,
        scale: f32,
    },
    CtrlWheel {
        position: Point,
        scale: f32,
    },
    ShiftWheel {
        position: Point,
        scale: f32,
    },

    // Behavioral meaning.
    Primary {
        position: Point,
    },
    Secondary {
        position: Point,
    },
    Select {
        position: Point,
        long_press: bool,
    },
    Drag {
        position: Point,
        delta: Point,
        velocity: f32,
    },
    Scroll {
        focus: Point,
        delta_y: f32,
        velocity: f32,
    },
    Pan {
        focus: Point,
        delta_x: f32,
        velocity: f32,
    },
    VerticalPage {
        bottom_to_top: bool,
    },
    HorizontalPage {
        left_to_right: bool,
    },
    Zoom {
        focus: Point,
        scale: f32,
    },
    /// `angle` is in degrees.
    Rotate {
        focus: Point,
        angle: f32,
    },
}

/// The kind of a [`GestureEvent`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GestureKind {
    Tap,
    DoubleTap,
    TwoFingerTap,
    LongPress,
    LongPressEnd,
    MoveStart,
    MoveTo,
    MoveEnd,
    LongPressMoveStart,
    LongPressMoveTo,
    LongPressMoveEnd,
    SwipeHorizontal,
    SwipeVertical,
    ScaleStart,
    ScaleTo,
    ScaleEnd,
    Wheel,
    CtrlWheel,
    ShiftWheel,
    Primary,
    Secondary,
    Select,
    Drag,
    Scroll,
    Pan,
    VerticalPage,
    HorizontalPage,
    Zoom,
    Rotate,
}

impl GestureKind {
    /// Whether this kind belongs to the behavioral layer.
    pub fn is_behavioral(self) -> bool {
        matches!(
            self,
            Self::Primary
                | Self::Secondary
                | Self::Select
                | Self::Drag
                | Self::Scroll
                | Self::Pan
                | Self::VerticalPage
                | Self::HorizontalPage
                | Self::Zoom
                | Self::Rotate
        )
    }
}

impl GestureEvent {
    /// The kind of this event.
    pub fn kind(&self) -> GestureKind {
        match self {
            Self::Tap { .. } => GestureKind::Tap,
            Self::DoubleTap { .. } => GestureKind::DoubleTap,
            Self::TwoFingerTap { .. } => GestureKind::TwoFingerTap,
            Self::LongPress { .. } => GestureKind::LongPress,
            Self::LongPressEnd { .. } => GestureKind::LongPressEnd,
            Self::MoveStart { .. } => GestureKind::MoveStart,
            Self::MoveTo { .. } => GestureKind::MoveTo,
            Self::MoveEnd { .. } => GestureKind::MoveEnd,
            Self::LongPressMoveStart { .. } => GestureKind::LongPressMoveStart,
            Self::LongPressMoveTo { .. } => GestureKind::LongPressMoveTo,
            Self::LongPressMoveEnd { .. } => GestureKind::LongPressMoveEnd,
            Self::SwipeHorizontal { .. } => GestureKind::SwipeHorizontal,
            Self::SwipeVertical { .. } => GestureKind::SwipeVertical,
            Self::ScaleStart { .. } => GestureKind::ScaleStart,
            Self::ScaleTo { .. } => GestureKind::ScaleTo,
            Self::ScaleEnd { .. } => GestureKind::ScaleEnd,
            Self::Wheel { .. } => GestureKind::Wheel,
            Self::CtrlWheel { .. } => GestureKind::CtrlWheel,
            Self::ShiftWheel { .. } => GestureKind::ShiftWheel,
            Self::Primary { .. } => GestureKind::Primary,
            Self::Secondary { .. } => GestureKind::Secondary,
            Self::Select { .. } => GestureKind::Select,
            Self::Drag { .. } => GestureKind::Drag,
            Self::Scroll { .. } => GestureKind::Scroll,
            Self::Pan { .. } => GestureKind::Pan,
            Self::VerticalPage { .. } => GestureKind::VerticalPage,
            Self::HorizontalPage { .. } => GestureKind::HorizontalPage,
            Self::Zoom { .. } => GestureKind::Zoom,
            Self::Rotate { .. } => GestureKind::Rotate,
        }
    }

    /// The contact behind a single-contact raw gesture.
    pub fn contact(&self) -> Option<ContactId> {
        match *self {
            Self::Tap { contact, .. }
            | Self::DoubleTap { contact, .. }
            | Self::TwoFingerTap { contact, .. }
            | Self::LongPress { contact, .. }
            | Self::LongPressEnd { contact, .. }
            | Self::MoveStart { contact, .. }
            | Self::MoveTo { contact, .. }
            | Self::MoveEnd { contact, .. }
            | Self::LongPressMoveStart { contact, .. }
            | Self::LongPressMoveTo { contact, .. }
            | Self::LongPressMoveEnd { contact, .. }
            | Self::SwipeHorizontal { contact, .. }
            | Self::SwipeVertical { contact, .. } => Some(contact),
            _ => None,
        }
    }

    /// The position or focus point carried by the event, if any.
    pub fn position(&self) -> Option<Point> {
        match *self {
            Self::Tap { position, .. }
            | Self::DoubleTap { position, .. }
            | Self::TwoFingerTap { position, .. }
            | Self::LongPress { position, .. }
            | Self::LongPressEnd { position, .. }
            | Self::MoveStart { position, .. }
            | Self::MoveTo { position, .. }
            | Self::MoveEnd { position, .. }
            | Self::LongPressMoveStart { position, .. }
            | Self::LongPressMoveTo { position, .. }
            | Self::LongPressMoveEnd { position, .. }
            | Self::Wheel { position, .. }
            | Self::CtrlWheel { position, .. }
            | Self::ShiftWheel { position, .. }
            | Self::Primary { position }
            | Self::Secondary { position }
            | Self::Select { position, .. }
            | Self::Drag { position, .. } => Some(position),
            Self::ScaleStart { focus, .. }
            | Self::ScaleTo { focus, .. }
            | Self::Scroll { focus, .. }
            | Self::Pan { focus, .. }
            | Self::Zoom { focus, .. }
            | Self::Rotate { focus, .. } => Some(focus),
            Self::SwipeHorizontal { .. }
            | Self::SwipeVertical { .. }
            | Self::ScaleEnd { .. }
            | Self::VerticalPage { .. }
            | Self::HorizontalPage { .. } => None,
        }
    }
}
