//! Tactile - gesture recognition for pointer, touch and wheel input.
//!
//! A [`GestureRecognizer`] is attached to one widget and turns raw contacts,
//! wheel ticks and key notifications into gestures: tap, double tap, long
//! press, move, long-press move, swipe, two-finger tap, pinch and rotate, and
//! wheel scroll, pan, zoom and page. Each gesture is delivered twice to a
//! [`GestureHandler`], once as the raw gesture and once as its behavioral
//! meaning (`primary`, `select`, `scroll`, `zoom`, ...).
//!
//! The recognizer never blocks or spawns. Timers for long press, single tap
//! and swipe are driven by the host through
//! [`next_deadline`](GestureRecognizer::next_deadline) and
//! [`fire_due_timers`](GestureRecognizer::fire_due_timers).
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use tactile::{
//!     Contact, ContactUpdate, GestureConfig, GestureHandler, GestureRecognizer, Point, Rect,
//!     WheelDebounceContext, WidgetFrame,
//! };
//!
//! #[derive(Default)]
//! struct Canvas {
//!     taps: Vec<Point>,
//! }
//!
//! impl GestureHandler for Canvas {
//!     fn primary(&mut self, position: Point) {
//!         self.taps.push(position);
//!     }
//! }
//!
//! // One context per application, shared by every recognizer.
//! let wheel_context = WheelDebounceContext::shared();
//! let frame = WidgetFrame::new(Rect::new(100.0, 100.0, 400.0, 300.0));
//! let mut recognizer =
//!     GestureRecognizer::try_new(GestureConfig::desktop(), frame, wheel_context)?;
//!
//! let mut canvas = Canvas::default();
//! let at = Point::new(150.0, 120.0);
//! recognizer.contact_down(Contact::new(1, at, Duration::ZERO), &mut canvas);
//! recognizer.contact_up(ContactUpdate::new(1, at, Duration::from_millis(80)), &mut canvas);
//! recognizer.fire_due_timers(Duration::from_secs(1), &mut canvas);
//!
//! assert_eq!(canvas.taps, vec![Point::new(50.0, 20.0)]);
//! # Ok::<(), tactile::TactileError>(())
//! ```

pub use tactile_core::*;

mod config;
mod contact;
mod double_tap;
mod event;
mod frame;
mod handler;
mod modifiers;
pub mod multitouch;
mod recognizer;
mod registry;
mod state;
pub mod velocity;
mod wheel;

pub use config::{
    DEFAULT_DESKTOP_DPI, DEFAULT_DOUBLE_TAP_DISTANCE, DEFAULT_DOUBLE_TAP_TIME_MS,
    DEFAULT_LONG_PRESS_MS, DEFAULT_MOBILE_DPI, DEFAULT_MOBILE_MOVE_JITTER, DEFAULT_SWIPE_TIME_MS,
    DEFAULT_SWIPE_VELOCITY, DEFAULT_WHEEL_PAGE_BURST_MS, DEFAULT_WHEEL_PAGE_IDLE_MS,
    DEFAULT_WHEEL_ROTATE_STEP, DEFAULT_WHEEL_SENSITIVITY, DEFAULT_WHEEL_TICK_DISTANCE,
    GestureConfig,
};
pub use contact::{Contact, ContactButton, ContactId, ContactSource, ContactUpdate, ScrollDirection};
pub use double_tap::DoubleTapDetector;
pub use event::{GestureEvent, GestureKind};
pub use frame::{PersistentPositions, WidgetFrame};
pub use handler::{GestureHandler, GestureLog, dispatch};
pub use modifiers::{KeyboardModifiers, ModifierKeyTracker, ModifierState};
pub use multitouch::{TwoFingerTracker, TwoFingerUpdate};
pub use recognizer::GestureRecognizer;
pub use registry::{AddOutcome, MAX_TRACKED_CONTACTS, TouchRegistry};
pub use state::{GestureState, TimerPurpose};
pub use velocity::VelocityTracker;
pub use wheel::{WheelDebounceContext, WheelDebouncer, WheelTick};
