//! The callback surface for recognized gestures.

use tactile_core::Point;

use crate::contact::ContactId;
use crate::event::{GestureEvent, GestureKind};

/// Receives recognized gestures.
///
/// Every method has an empty default, so implementors override only what
/// they care about. The recognizer calls [`on_gesture`](Self::on_gesture) for
/// each event; its default dispatches to the named method. Override
/// `on_gesture` instead to receive every event as a value.
///
/// ```
/// use tactile::{GestureHandler, Point};
///
/// #[derive(Default)]
/// struct Viewer {
///     zoom: f32,
/// }
///
/// impl GestureHandler for Viewer {
///     fn zoom(&mut self, _focus: Point, scale: f32) {
///         self.zoom *= scale;
///     }
/// }
/// ```
#[allow(unused_variables)]
pub trait GestureHandler {
    /// Entry point for every event.
    fn on_gesture(&mut self, event: &GestureEvent) {
        dispatch(self, event);
    }

    fn tap(&mut self, contact: ContactId, position: Point) {}
    fn double_tap(&mut self, contact: ContactId, position: Point) {}
    fn two_finger_tap(&mut self, contact: ContactId, position: Point) {}
    fn long_press(&mut self, contact: ContactId, position: Point) {}
    fn long_press_end(&mut self, contact: ContactId, position: Point) {}

    fn move_start(&mut self, contact: ContactId, position: Point) {}
    fn move_to(&mut self, contact: ContactId, position: Point, velocity: f32) {}
    fn move_end(&mut self, contact: ContactId, position: Point) {}

    fn long_press_move_start(&mut self, contact: ContactId, position: Point) {}
    fn long_press_move_to(&mut self, contact: ContactId, position: Point, velocity: f32) {}
    fn long_press_move_end(&mut self, contact: ContactId, position: Point) {}

    fn swipe_horizontal(&mut self, contact: ContactId, left_to_right: bool) {}
    fn swipe_vertical(&mut self, contact: ContactId, bottom_to_top: bool) {}

    fn scale_start(&mut self, contacts: [ContactId; 2], focus: Point) {}
    fn scale_to(&mut self, contacts: [ContactId; 2], scale: f32, focus: Point) {}
    fn scale_end(&mut self, contacts: [ContactId; 2]) {}

    fn wheel(&mut self, position: Point, scale: f32) {}
    fn ctrl_wheel(&mut self, position: Point, scale: f32) {}
    fn shift_wheel(&mut self, position: Point, scale: f32) {}

    /// A tap.
    fn primary(&mut self, position: Point) {}
    /// A two-finger tap or secondary click.
    fn secondary(&mut self, position: Point) {}
    /// A double tap, or a long press when `long_press` is set.
    fn select(&mut self, position: Point, long_press: bool) {}
    /// Movement after a long press.
    fn drag(&mut self, position: Point, delta: Point, velocity: f32) {}
    fn scroll(&mut self, focus: Point, delta_y: f32, velocity: f32) {}
    fn pan(&mut self, focus: Point, delta_x: f32, velocity: f32) {}
    fn vertical_page(&mut self, bottom_to_top: bool) {}
    fn horizontal_page(&mut self, left_to_right: bool) {}
    fn zoom(&mut self, focus: Point, scale: f32) {}
    /// Rotation in degrees.
    fn rotate(&mut self, focus: Point, angle: f32) {}
}

/// Route `event` to the matching named method of `handler`.
pub fn dispatch<H: GestureHandler + ?Sized>(handler: &mut H, event: &GestureEvent) {
    match *event {
        GestureEvent::Tap { contact, position } => handler.tap(contact, position),
        GestureEvent::DoubleTap { contact, position } => handler.double_tap(contact, position),
        GestureEvent::TwoFingerTap { contact, position } => {
            handler.two_finger_tap(contact, position)
        }
        GestureEvent::LongPress { contact, position } => handler.long_press(contact, position),
        GestureEvent::LongPressEnd { contact, position } => {
            handler.long_press_end(contact, position)
        }
        GestureEvent::MoveStart { contact, position } => handler.move_start(contact, position),
        GestureEvent::MoveTo {
            contact,
            position,
            velocity,
        } => handler.move_to(contact, position, velocity),
        GestureEvent::MoveEnd { contact, position } => handler.move_end(contact, position),
        GestureEvent::LongPressMoveStart { contact, position } => {
            handler.long_press_move_start(contact, position)
        }
        GestureEvent::LongPressMoveTo {
            contact,
            position,
            velocity,
        } => handler.long_press_move_to(contact, position, velocity),
        GestureEvent::LongPressMoveEnd { contact, position } => {
            handler.long_press_move_end(contact, position)
        }
        GestureEvent::SwipeHorizontal {
            contact,
            left_to_right,
        } => handler.swipe_horizontal(contact, left_to_right),
        GestureEvent::SwipeVertical {
            contact,
            bottom_to_top,
        } => handler.swipe_vertical(contact, bottom_to_top),
        GestureEvent::ScaleStart { contacts, focus } => handler.scale_start(contacts, focus),
        GestureEvent::ScaleTo {
            contacts,
            scale,
            focus,
        } => handler.scale_to(contacts, scale, focus),
        GestureEvent::ScaleEnd { contacts } => handler.scale_end(contacts),
        GestureEvent::Wheel { position, scale } => handler.wheel(position, scale),
        GestureEvent::CtrlWheel { position, scale } => handler.ctrl_wheel(position, scale),
        GestureEvent::ShiftWheel { position, scale } => handler.shift_wheel(position, scale),
        GestureEvent::Primary { position } => handler.primary(position),
        GestureEvent::Secondary { position } => handler.secondary(position),
        GestureEvent::Select {
            position,
            long_press,
        } => handler.select(position, long_press),
        GestureEvent::Drag {
            position,
            delta,
            velocity,
        } => handler.drag(position, delta, velocity),
        GestureEvent::Scroll {
            focus,
            delta_y,
            velocity,
        } => handler.scroll(focus, delta_y, velocity),
        GestureEvent::Pan {
            focus,
            delta_x,
            velocity,
        } => handler.pan(focus, delta_x, velocity),
        GestureEvent::VerticalPage { bottom_to_top } => handler.vertical_page(bottom_to_top),
        GestureEvent::HorizontalPage { left_to_right } => handler.horizontal_page(left_to_right),
        GestureEvent::Zoom { focus, scale } => handler.zoom(focus, scale),
        GestureEvent::Rotate { focus, angle } => handler.rotate(focus, angle),
    }
}

/// A handler that records every event in order.
#[derive(Debug, Clone, Default)]
pub struct GestureLog {
    events: Vec<GestureEvent>,
}

impl GestureLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded events.
    pub fn events(&self) -> &[GestureEvent] {
        &self.events
    }

    /// Kinds of all recorded events, in order.
    pub fn kinds(&self) -> Vec<GestureKind> {
        self.events.iter().map(GestureEvent::kind).collect()
    }

    /// Number of recorded events of `kind`.
    pub fn count(&self, kind: GestureKind) -> usize {
        self.events.iter().filter(|e| e.kind() == kind).count()
    }

    /// Recorded events of `kind`.
    pub fn of_kind(&self, kind: GestureKind) -> impl Iterator<Item = &GestureEvent> {
        self.events.iter().filter(move |e| e.kind() == kind)
    }

    pub fn last(&self) -> Option<&GestureEvent> {
        self.events.last()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Take the recorded events, leaving the log empty.
    pub fn take(&mut self) -> Vec<GestureEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl GestureHandler for GestureLog {
    fn on_gesture(&mut self, event: &GestureEvent) {
        self.events.push(*event);
    }
}
