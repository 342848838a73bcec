//! The gesture state machine.
//!
//! A [`GestureRecognizer`] is attached to one widget. The host feeds it
//! contact-down, move and up reports, wheel ticks and key notifications, and
//! wakes it for timers:
//!
//! ```
//! use std::time::Duration;
//! use tactile::{
//!     Contact, ContactUpdate, GestureConfig, GestureKind, GestureLog, GestureRecognizer,
//!     Point, WheelDebounceContext, WidgetFrame,
//! };
//!
//! let mut recognizer = GestureRecognizer::new(
//!     GestureConfig::desktop(),
//!     WidgetFrame::default(),
//!     WheelDebounceContext::shared(),
//! );
//! let mut log = GestureLog::new();
//! let at = Point::new(10.0, 10.0);
//!
//! recognizer.contact_down(Contact::new(1, at, Duration::ZERO), &mut log);
//! recognizer.contact_up(ContactUpdate::new(1, at, Duration::from_millis(60)), &mut log);
//!
//! // Nothing yet: a second tap could still follow.
//! assert!(log.is_empty());
//!
//! // The host sleeps until the next deadline, then fires due timers.
//! let deadline = recognizer.next_deadline().unwrap();
//! recognizer.fire_due_timers(deadline, &mut log);
//! assert_eq!(log.kinds(), vec![GestureKind::Tap, GestureKind::Primary]);
//! ```

use std::sync::Arc;

use tactile_core::logging::{span_names, targets};
use tactile_core::{Clock, PerfSpan, Point, Result, Timestamp, TimerId, TimerManager};

use crate::config::GestureConfig;
use crate::contact::{Contact, ContactButton, ContactId, ContactUpdate};
use crate::double_tap::DoubleTapDetector;
use crate::event::GestureEvent;
use crate::frame::{PersistentPositions, WidgetFrame};
use crate::handler::GestureHandler;
use crate::modifiers::{KeyboardModifiers, ModifierKeyTracker, ModifierState};
use crate::multitouch::{TwoFingerTracker, midpoint};
use crate::registry::{AddOutcome, TouchRegistry};
use crate::state::{GestureState, TimerPurpose};
use crate::velocity::{VelocityTracker, inches_per_second};
use crate::wheel::{WheelDebounceContext, WheelDebouncer, WheelTick};

/// Classifies raw input for one widget into gestures.
#[derive(Debug)]
pub struct GestureRecognizer {
    config: GestureConfig,
    frame: WidgetFrame,
    state: GestureState,
    registry: TouchRegistry,
    positions: PersistentPositions,
    timers: TimerManager<TimerPurpose>,
    long_press_timer: Option<TimerId>,
    single_tap_timer: Option<TimerId>,
    swipe_timer: Option<TimerId>,
    velocity: VelocityTracker,
    two_finger: TwoFingerTracker,
    wheel: WheelDebouncer,
    modifiers: ModifierKeyTracker,
    double_tap: DoubleTapDetector,
}

impl GestureRecognizer {
    /// Create a recognizer. `wheel_context` should be shared by every
    /// recognizer in the application.
    pub fn new(
        config: GestureConfig,
        frame: WidgetFrame,
        wheel_context: Arc<WheelDebounceContext>,
    ) -> Self {
        Self {
            state: GestureState::Idle,
            registry: TouchRegistry::new(),
            positions: PersistentPositions::default(),
            timers: TimerManager::new(),
            long_press_timer: None,
            single_tap_timer: None,
            swipe_timer: None,
            velocity: VelocityTracker::new(config.dpi),
            two_finger: TwoFingerTracker::default(),
            wheel: WheelDebouncer::new(wheel_context, &config),
            modifiers: ModifierKeyTracker::new(config.command_is_ctrl, config.lock_is_alt),
            double_tap: DoubleTapDetector::new(config.double_tap_time, config.double_tap_distance),
            frame,
            config,
        }
    }

    /// Create a recognizer after validating `config`.
    pub fn try_new(
        config: GestureConfig,
        frame: WidgetFrame,
        wheel_context: Arc<WheelDebounceContext>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(config, frame, wheel_context))
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn frame(&self) -> &WidgetFrame {
        &self.frame
    }

    /// Move or resize the widget.
    pub fn set_frame(&mut self, frame: WidgetFrame) {
        self.frame = frame;
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Number of contacts currently tracked.
    pub fn tracked_contacts(&self) -> usize {
        self.registry.len()
    }

    pub fn modifiers(&self) -> ModifierState {
        self.modifiers.state()
    }

    /// When the host should next call [`fire_due_timers`](Self::fire_due_timers).
    pub fn next_deadline(&mut self) -> Option<Timestamp> {
        self.timers.next_deadline()
    }

    /// Drop every tracked contact and pending timer and return to Idle.
    pub fn reset(&mut self) {
        self.registry.clear();
        self.timers.clear();
        self.long_press_timer = None;
        self.single_tap_timer = None;
        self.swipe_timer = None;
        self.positions.clear();
        self.two_finger.clear();
        self.velocity.clear();
        self.transition(GestureState::Idle);
    }

    /// A key went down.
    pub fn key_down(&mut self, modifiers: KeyboardModifiers) {
        self.modifiers.key_down(modifiers);
    }

    /// A key was released.
    pub fn key_up(&mut self, modifiers: KeyboardModifiers) {
        self.modifiers.key_up(modifiers);
    }

    /// A contact went down.
    pub fn contact_down(&mut self, contact: Contact, handler: &mut dyn GestureHandler) {
        let _span = PerfSpan::new(span_names::RECOGNIZER_STEP);
        if !self.frame.contains(contact.position) {
            return;
        }

        if self.missed_terminal_event(&contact) {
            tracing::debug!(
                target: targets::RECOGNIZER,
                id = ?contact.id,
                state = ?self.state,
                "terminal event missed, resetting"
            );
            self.reset();
        }

        // Scroll contacts are one-shot ticks and are never tracked.
        if contact.is_scroll {
            self.transition(GestureState::Wheel);
            if let Some(direction) = contact.button.scroll_direction() {
                let tick = WheelTick::new(direction, contact.start_time, contact.position);
                self.dispatch_wheel(&tick, handler);
            }
            return;
        }

        let id = contact.id;
        let position = contact.position;
        let time = contact.start_time;
        let button = contact.button;

        match self.registry.add(contact) {
            AddOutcome::Added(1) if button == ContactButton::Secondary => {
                self.transition(GestureState::SecondaryCandidate);
            }
            AddOutcome::Added(1) => {
                self.transition(GestureState::PrimaryCandidate);
                self.positions.clear();
                self.positions.set(0, position);
                self.arm_tap_timers(id, position, time);
            }
            AddOutcome::Added(_) => self.begin_two_finger(handler),
            AddOutcome::ReplacedSynthetic { .. } => {
                if let Some((first, second)) = self.registry.pair() {
                    let ids = [first.id, second.id];
                    let (a, b) = (first.position, second.position);
                    self.positions.reseed(a, b);
                    self.two_finger.begin(ids, a, b);
                }
            }
            AddOutcome::Duplicate | AddOutcome::Synthetic | AddOutcome::Overflow => {}
        }
    }

    /// A tracked contact moved.
    pub fn contact_move(&mut self, update: ContactUpdate, handler: &mut dyn GestureHandler) {
        let _span = PerfSpan::new(span_names::RECOGNIZER_STEP);
        if !self.frame.contains(update.position) {
            return;
        }
        let Some((origin, previous)) = self.registry.get(update.id).map(|c| (c.origin, c.position))
        else {
            return;
        };
        let delta = update.position - previous;
        if delta == Point::ZERO {
            return;
        }
        // Touch slop: a candidate that has not left the jitter radius is
        // still a press. Its position is kept so the long press can re-check it.
        if self.state == GestureState::PrimaryCandidate
            && self.config.move_jitter > 0.0
            && origin.distance(update.position) <= self.config.move_jitter
        {
            self.registry.update(update.id, update.position, update.time);
            return;
        }
        let Some(contact) = self
            .registry
            .update(update.id, update.position, update.time)
            .cloned()
        else {
            return;
        };

        self.cancel_tap_timers();

        match self.state {
            GestureState::LongPressed => {
                self.transition(GestureState::LongPressMove);
                self.velocity.start(contact.origin, contact.start_time);
                emit(
                    handler,
                    GestureEvent::LongPressMoveStart {
                        contact: contact.id,
                        position: self.frame.to_local(contact.origin),
                    },
                );
            }
            GestureState::PrimaryCandidate => {
                self.transition(GestureState::Disambiguate);
                self.velocity.start(contact.origin, contact.start_time);
                if contact.elapsed() < self.config.swipe_time {
                    self.swipe_timer = Some(self.timers.start_one_shot(
                        contact.start_time,
                        self.config.swipe_time,
                        TimerPurpose::Swipe(contact.id),
                    ));
                }
                emit(
                    handler,
                    GestureEvent::MoveStart {
                        contact: contact.id,
                        position: self.frame.to_local(contact.origin),
                    },
                );
            }
            _ => {}
        }

        if self.state == GestureState::Disambiguate {
            if contact.elapsed() < self.config.swipe_time {
                if self.possible_swipe(&contact, handler) {
                    self.reset();
                }
                return;
            }
            self.cancel_swipe_timer();
            self.transition(GestureState::Move);
        }

        let local = self.frame.to_local(contact.position);
        match self.state {
            GestureState::SecondaryCandidate | GestureState::Scale => {
                self.two_finger_move(&contact, handler);
            }
            GestureState::Move => {
                let velocity = self.velocity.sample(contact.position, contact.update_time);
                emit(
                    handler,
                    GestureEvent::MoveTo {
                        contact: contact.id,
                        position: local,
                        velocity,
                    },
                );
                if delta.y != 0.0 {
                    emit(
                        handler,
                        GestureEvent::Scroll {
                            focus: local,
                            delta_y: delta.y,
                            velocity,
                        },
                    );
                }
                if delta.x != 0.0 {
                    emit(
                        handler,
                        GestureEvent::Pan {
                            focus: local,
                            delta_x: delta.x,
                            velocity,
                        },
                    );
                }
            }
            GestureState::LongPressMove => {
                let velocity = self.velocity.sample(contact.position, contact.update_time);
                emit(
                    handler,
                    GestureEvent::LongPressMoveTo {
                        contact: contact.id,
                        position: local,
                        velocity,
                    },
                );
                emit(
                    handler,
                    GestureEvent::Drag {
                        position: local,
                        delta,
                        velocity,
                    },
                );
            }
            _ => {}
        }
    }

    /// A tracked contact was lifted.
    pub fn contact_up(&mut self, update: ContactUpdate, handler: &mut dyn GestureHandler) {
        let _span = PerfSpan::new(span_names::RECOGNIZER_STEP);
        let Some(contact) = self
            .registry
            .update(update.id, update.position, update.time)
            .cloned()
        else {
            // The up of an untracked scroll contact ends the wheel gesture.
            if self.state == GestureState::Wheel && self.registry.is_empty() {
                self.reset();
            }
            return;
        };

        self.cancel_long_press_timer();
        let id = contact.id;
        let local = self.frame.to_local(contact.position);

        match self.state {
            GestureState::PrimaryCandidate => {
                let is_double_tap = match update.is_double_tap {
                    Some(flag) => flag,
                    None => self.double_tap.matches(&contact),
                };
                if is_double_tap {
                    self.double_tap.forget();
                    emit(handler, GestureEvent::DoubleTap { contact: id, position: local });
                    emit(
                        handler,
                        GestureEvent::Select {
                            position: local,
                            long_press: false,
                        },
                    );
                    self.reset();
                } else {
                    self.double_tap.remember(&contact);
                    self.registry.remove(id);
                    if !self.single_tap_pending() {
                        self.reset();
                    }
                }
            }
            GestureState::SecondaryCandidate => {
                if let Some(contacts) = self.two_finger.contacts() {
                    emit(handler, GestureEvent::ScaleEnd { contacts });
                }
                emit(handler, GestureEvent::TwoFingerTap { contact: id, position: local });
                emit(handler, GestureEvent::Secondary { position: local });
                self.reset();
            }
            GestureState::Disambiguate => {
                let swiped = contact.elapsed() < self.config.swipe_time
                    && self.possible_swipe(&contact, handler);
                if !swiped {
                    emit(handler, GestureEvent::MoveEnd { contact: id, position: local });
                }
                self.reset();
            }
            GestureState::Scale => {
                if let Some(contacts) = self.two_finger.contacts() {
                    emit(handler, GestureEvent::ScaleEnd { contacts });
                }
                self.reset();
            }
            GestureState::LongPressMove => {
                emit(handler, GestureEvent::LongPressMoveEnd { contact: id, position: local });
                self.reset();
            }
            GestureState::Move => {
                emit(handler, GestureEvent::MoveEnd { contact: id, position: local });
                self.reset();
            }
            GestureState::LongPressed => {
                emit(handler, GestureEvent::LongPressEnd { contact: id, position: local });
                self.reset();
            }
            GestureState::Wheel => self.reset(),
            GestureState::Idle => {
                self.registry.remove(id);
            }
        }
    }

    /// A wheel tick that did not arrive as a contact.
    pub fn wheel(&mut self, tick: WheelTick, handler: &mut dyn GestureHandler) {
        let _span = PerfSpan::new(span_names::RECOGNIZER_STEP);
        if !self.frame.contains(tick.position) {
            return;
        }
        self.dispatch_wheel(&tick, handler);
    }

    /// Fire every timer due at `now`, in deadline order. Returns how many fired.
    pub fn fire_due_timers(&mut self, now: Timestamp, handler: &mut dyn GestureHandler) -> usize {
        let _span = PerfSpan::new(span_names::TIMER_POLL);
        let mut fired = 0;
        // One at a time: a firing may cancel timers due later in this batch.
        while let Some((id, purpose)) = self.timers.pop_expired(now) {
            fired += 1;
            tracing::trace!(target: targets::RECOGNIZER, ?purpose, "timer fired");
            match purpose {
                TimerPurpose::LongPress(contact) => {
                    clear_slot(&mut self.long_press_timer, id);
                    self.long_press_fired(contact, handler);
                }
                TimerPurpose::SingleTap { contact, position } => {
                    clear_slot(&mut self.single_tap_timer, id);
                    self.single_tap_fired(contact, position, handler);
                }
                TimerPurpose::Swipe(contact) => {
                    clear_slot(&mut self.swipe_timer, id);
                    self.swipe_timer_fired(contact, handler);
                }
            }
        }
        fired
    }

    /// Fire every timer due at `clock`'s current time.
    pub fn poll<C: Clock + ?Sized>(
        &mut self,
        clock: &C,
        handler: &mut dyn GestureHandler,
    ) -> usize {
        self.fire_due_timers(clock.now(), handler)
    }

    fn missed_terminal_event(&self, contact: &Contact) -> bool {
        let stuck_long_press = self.state == GestureState::LongPressed
            && self.registry.len() == 1
            && !self.registry.contains(contact.id);
        let stuck_wheel = self.state == GestureState::Wheel && !contact.is_scroll;
        stuck_long_press || stuck_wheel
    }

    fn begin_two_finger(&mut self, handler: &mut dyn GestureHandler) {
        let Some((first, second)) = self.registry.pair() else {
            return;
        };
        let ids = [first.id, second.id];
        let (a, b) = (first.position, second.position);
        let first_local = self.frame.to_local(a);

        match self.state {
            GestureState::Disambiguate | GestureState::Move => emit(
                handler,
                GestureEvent::MoveEnd {
                    contact: ids[0],
                    position: first_local,
                },
            ),
            GestureState::LongPressMove => emit(
                handler,
                GestureEvent::LongPressMoveEnd {
                    contact: ids[0],
                    position: first_local,
                },
            ),
            _ => {}
        }

        self.cancel_swipe_timer();
        self.velocity.clear();
        self.positions.reseed(a, b);
        self.two_finger.begin(ids, a, b);
        self.transition(GestureState::SecondaryCandidate);
        emit(
            handler,
            GestureEvent::ScaleStart {
                contacts: ids,
                focus: midpoint(a, b, &self.frame),
            },
        );
    }

    fn two_finger_move(&mut self, contact: &Contact, handler: &mut dyn GestureHandler) {
        if self.registry.len() != 2 {
            return;
        }
        let (Some(index), Some(contacts)) = (
            self.registry.index_of(contact.id),
            self.two_finger.contacts(),
        ) else {
            return;
        };

        self.transition(GestureState::Scale);
        self.positions.set(index, contact.position);
        let (a, b) = self.positions.pair();
        let update = self.two_finger.update(a, b);
        let focus = midpoint(a, b, &self.frame);

        if let Some(scale) = update.scale {
            emit(
                handler,
                GestureEvent::ScaleTo {
                    contacts,
                    scale,
                    focus,
                },
            );
            emit(handler, GestureEvent::Zoom { focus, scale });
        }
        if let Some(angle) = update.rotation {
            emit(handler, GestureEvent::Rotate { focus, angle });
        }
    }

    /// Report a swipe if `contact` moved fast enough. The move already
    /// started is retracted to the origin first.
    fn possible_swipe(&mut self, contact: &Contact, handler: &mut dyn GestureHandler) -> bool {
        let velocity = inches_per_second(
            contact.origin.distance(contact.position),
            contact.elapsed(),
            self.config.dpi,
        );
        if velocity <= self.config.swipe_velocity {
            return false;
        }

        let id = contact.id;
        let origin = self.frame.to_local(contact.origin);
        let displacement = contact.displacement();
        tracing::debug!(target: targets::RECOGNIZER, ?id, velocity, "swipe");

        emit(
            handler,
            GestureEvent::MoveTo {
                contact: id,
                position: origin,
                velocity: 0.0,
            },
        );
        emit(handler, GestureEvent::MoveEnd { contact: id, position: origin });

        if contact.is_horizontal() {
            let left_to_right = displacement.x > 0.0;
            emit(handler, GestureEvent::SwipeHorizontal { contact: id, left_to_right });
            emit(handler, GestureEvent::HorizontalPage { left_to_right });
        } else {
            let bottom_to_top = displacement.y > 0.0;
            emit(handler, GestureEvent::SwipeVertical { contact: id, bottom_to_top });
            emit(handler, GestureEvent::VerticalPage { bottom_to_top });
        }
        true
    }

    fn long_press_fired(&mut self, id: ContactId, handler: &mut dyn GestureHandler) {
        let Some(contact) = self.registry.get(id) else {
            return;
        };
        let radius = self.config.double_tap_distance;
        if contact.position.distance_squared(contact.origin) >= radius * radius {
            return;
        }
        let local = self.frame.to_local(contact.position);

        self.cancel_tap_timers();
        self.transition(GestureState::LongPressed);
        emit(handler, GestureEvent::LongPress { contact: id, position: local });
        emit(
            handler,
            GestureEvent::Select {
                position: local,
                long_press: true,
            },
        );
    }

    fn single_tap_fired(
        &mut self,
        id: ContactId,
        position: Point,
        handler: &mut dyn GestureHandler,
    ) {
        if self.state != GestureState::PrimaryCandidate || self.long_press_pending() {
            return;
        }
        let local = self.frame.to_local(position);
        emit(handler, GestureEvent::Tap { contact: id, position: local });
        emit(handler, GestureEvent::Primary { position: local });
        self.reset();
    }

    fn swipe_timer_fired(&mut self, id: ContactId, handler: &mut dyn GestureHandler) {
        if self.state != GestureState::Disambiguate {
            return;
        }
        let Some(contact) = self.registry.get(id).cloned() else {
            return;
        };
        if self.possible_swipe(&contact, handler) {
            self.reset();
        } else {
            self.transition(GestureState::Move);
        }
    }

    fn dispatch_wheel(&mut self, tick: &WheelTick, handler: &mut dyn GestureHandler) {
        let focus = self.frame.to_local(tick.position);
        for event in self.wheel.tick(tick, self.modifiers.state(), focus) {
            emit(handler, event);
        }
    }

    fn arm_tap_timers(&mut self, id: ContactId, position: Point, now: Timestamp) {
        self.cancel_tap_timers();
        self.long_press_timer = Some(self.timers.start_one_shot(
            now,
            self.config.long_press_delay,
            TimerPurpose::LongPress(id),
        ));
        self.single_tap_timer = Some(self.timers.start_one_shot(
            now,
            self.config.single_tap_window(),
            TimerPurpose::SingleTap {
                contact: id,
                position,
            },
        ));
    }

    fn single_tap_pending(&self) -> bool {
        self.single_tap_timer.is_some_and(|id| self.timers.is_active(id))
    }

    fn long_press_pending(&self) -> bool {
        self.long_press_timer.is_some_and(|id| self.timers.is_active(id))
    }

    fn cancel_tap_timers(&mut self) {
        self.cancel_long_press_timer();
        if let Some(id) = self.single_tap_timer.take() {
            self.timers.cancel(id);
        }
    }

    fn cancel_long_press_timer(&mut self) {
        if let Some(id) = self.long_press_timer.take() {
            self.timers.cancel(id);
        }
    }

    fn cancel_swipe_timer(&mut self) {
        if let Some(id) = self.swipe_timer.take() {
            self.timers.cancel(id);
        }
    }

    fn transition(&mut self, next: GestureState) {
        if matches!(next, GestureState::Scale | GestureState::SecondaryCandidate) {
            self.cancel_tap_timers();
        }
        if self.state != next {
            tracing::debug!(
                target: targets::RECOGNIZER,
                from = ?self.state,
                to = ?next,
                "state transition"
            );
            self.state = next;
        }
    }
}

fn clear_slot(slot: &mut Option<TimerId>, fired: TimerId) {
    if *slot == Some(fired) {
        *slot = None;
    }
}

fn emit(handler: &mut dyn GestureHandler, event: GestureEvent) {
    tracing::trace!(target: targets::RECOGNIZER, kind = ?event.kind(), "gesture");
    handler.on_gesture(&event);
}
