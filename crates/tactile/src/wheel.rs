//! Mouse wheel handling: page bursts and continuous scroll, pan, zoom and rotate.
//!
//! A fast burst of ticks after a quiet period turns into a single page event.
//! Every tick also produces a continuous event picked by the held modifiers.
//!
//! The burst detector needs to see ticks across every widget, since a burst
//! that starts over one widget may continue over its neighbour. That last-tick
//! timestamp lives in a [`WheelDebounceContext`] the application creates once
//! and shares between recognizers. The armed flag stays per widget.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use static_assertions::assert_impl_all;
use tactile_core::logging::targets;
use tactile_core::{Point, Timestamp};

use crate::config::GestureConfig;
use crate::contact::ScrollDirection;
use crate::event::GestureEvent;
use crate::modifiers::ModifierState;
use crate::velocity::inches_per_second;

/// A discrete wheel tick.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WheelTick {
    pub direction: ScrollDirection,
    pub time: Timestamp,
    /// Pointer position in source coordinates.
    pub position: Point,
}

impl WheelTick {
    pub fn new(direction: ScrollDirection, time: Timestamp, position: Point) -> Self {
        Self {
            direction,
            time,
            position,
        }
    }
}

/// Last wheel tick seen by any recognizer in the application.
#[derive(Debug, Default)]
pub struct WheelDebounceContext {
    last_tick: Mutex<Option<Timestamp>>,
}

assert_impl_all!(WheelDebounceContext: Send, Sync);

impl WheelDebounceContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh context ready to hand to several recognizers.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Store `now` as the last tick and return the gap since the previous one.
    pub fn record(&self, now: Timestamp) -> Option<Duration> {
        let previous = self.last_tick.lock().replace(now);
        previous.map(|previous| now.saturating_sub(previous))
    }

    /// The last tick seen, if any.
    pub fn last_tick(&self) -> Option<Timestamp> {
        *self.last_tick.lock()
    }
}

/// Per-widget wheel state.
#[derive(Debug)]
pub struct WheelDebouncer {
    context: Arc<WheelDebounceContext>,
    armed: bool,
    sensitivity: f32,
    tick_distance: f32,
    rotate_step: f32,
    page_burst: Duration,
    page_idle: Duration,
    dpi: f32,
}

impl WheelDebouncer {
    /// Create a debouncer sharing `context` with the rest of the application.
    pub fn new(context: Arc<WheelDebounceContext>, config: &GestureConfig) -> Self {
        Self {
            context,
            armed: false,
            sensitivity: config.wheel_sensitivity,
            tick_distance: config.wheel_tick_distance,
            rotate_step: config.wheel_rotate_step,
            page_burst: config.wheel_page_burst,
            page_idle: config.wheel_page_idle,
            dpi: config.dpi,
        }
    }

    /// Whether the next fast tick will page.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn context(&self) -> &Arc<WheelDebounceContext> {
        &self.context
    }

    /// Classify one tick. `focus` is the widget-local pointer position.
    pub fn tick(
        &mut self,
        tick: &WheelTick,
        modifiers: ModifierState,
        focus: Point,
    ) -> Vec<GestureEvent> {
        let gap = self.context.record(tick.time);
        let mut events = Vec::with_capacity(3);

        if gap.is_none_or(|gap| gap > self.page_idle) {
            self.armed = true;
        }
        if self.armed && gap.is_some_and(|gap| gap < self.page_burst) {
            self.armed = false;
            tracing::debug!(
                target: targets::WHEEL,
                direction = ?tick.direction,
                "wheel burst, paging"
            );
            events.push(page_event(tick.direction));
        }

        let velocity = gap.map_or(0.0, |gap| {
            inches_per_second(self.tick_distance, gap, self.dpi)
        });
        self.continuous(tick.direction, modifiers, focus, velocity, &mut events);
        events
    }

    fn continuous(
        &self,
        direction: ScrollDirection,
        modifiers: ModifierState,
        focus: Point,
        velocity: f32,
        events: &mut Vec<GestureEvent>,
    ) {
        // Up and Left shrink, Down and Right grow.
        let scale = if direction.sign() < 0.0 {
            1.0 / self.sensitivity
        } else {
            self.sensitivity
        };
        let delta = direction.sign() * self.tick_distance;

        if !direction.is_vertical() || (modifiers.shift && !modifiers.ctrl) {
            events.push(GestureEvent::ShiftWheel {
                position: focus,
                scale,
            });
            events.push(GestureEvent::Pan {
                focus,
                delta_x: delta,
                velocity,
            });
        } else if modifiers.ctrl {
            events.push(GestureEvent::CtrlWheel {
                position: focus,
                scale,
            });
            events.push(GestureEvent::Zoom { focus, scale });
        } else if modifiers.alt {
            let angle = if direction == ScrollDirection::Up {
                self.rotate_step
            } else {
                -self.rotate_step
            };
            events.push(GestureEvent::Rotate { focus, angle });
        } else {
            events.push(GestureEvent::Wheel {
                position: focus,
                scale,
            });
            events.push(GestureEvent::Scroll {
                focus,
                delta_y: delta,
                velocity,
            });
        }
    }
}

fn page_event(direction: ScrollDirection) -> GestureEvent {
    match direction {
        ScrollDirection::Up | ScrollDirection::Down => GestureEvent::VerticalPage {
            bottom_to_top: direction == ScrollDirection::Up,
        },
        ScrollDirection::Left | ScrollDirection::Right => GestureEvent::HorizontalPage {
            left_to_right: direction == ScrollDirection::Right,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::GestureKind;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn debouncer(context: &Arc<WheelDebounceContext>) -> WheelDebouncer {
        WheelDebouncer::new(Arc::clone(context), &GestureConfig::desktop())
    }

    fn tick(direction: ScrollDirection, at: u64) -> WheelTick {
        WheelTick::new(direction, ms(at), Point::new(10.0, 10.0))
    }

    fn kinds(events: &[GestureEvent]) -> Vec<GestureKind> {
        events.iter().map(GestureEvent::kind).collect()
    }

    #[test]
    fn test_context_records_gaps() {
        let context = WheelDebounceContext::new();
        assert_eq!(context.record(ms(100)), None);
        assert_eq!(context.record(ms(130)), Some(ms(30)));
        assert_eq!(context.last_tick(), Some(ms(130)));
        // A clock that went backwards reads as no gap.
        assert_eq!(context.record(ms(120)), Some(Duration::ZERO));
    }

    #[test]
    fn test_burst_after_idle_pages_once() {
        let context = WheelDebounceContext::shared();
        let mut wheel = debouncer(&context);

        let first = wheel.tick(
            &tick(ScrollDirection::Down, 1000),
            ModifierState::NONE,
            Point::ZERO,
        );
        assert_eq!(kinds(&first), vec![GestureKind::Wheel, GestureKind::Scroll]);
        assert!(wheel.is_armed());

        let second = wheel.tick(
            &tick(ScrollDirection::Down, 1020),
            ModifierState::NONE,
            Point::ZERO,
        );
        assert_eq!(
            kinds(&second),
            vec![GestureKind::VerticalPage, GestureKind::Wheel, GestureKind::Scroll]
        );
        assert_eq!(
            second[0],
            GestureEvent::VerticalPage {
                bottom_to_top: false
            }
        );
        assert!(!wheel.is_armed());

        // The rest of the burst only scrolls.
        let third = wheel.tick(
            &tick(ScrollDirection::Down, 1030),
            ModifierState::NONE,
            Point::ZERO,
        );
        assert_eq!(kinds(&third), vec![GestureKind::Wheel, GestureKind::Scroll]);
    }

    #[test]
    fn test_slow_ticks_never_page() {
        let context = WheelDebounceContext::shared();
        let mut wheel = debouncer(&context);
        for at in [0, 100, 200, 300] {
            let events = wheel.tick(
                &tick(ScrollDirection::Up, at),
                ModifierState::NONE,
                Point::ZERO,
            );
            assert!(!kinds(&events).contains(&GestureKind::VerticalPage));
        }
    }

    #[test]
    fn test_shared_timestamp_spans_widgets() {
        let context = WheelDebounceContext::shared();
        let mut left = debouncer(&context);
        let mut right = debouncer(&context);

        left.tick(&tick(ScrollDirection::Right, 0), ModifierState::NONE, Point::ZERO);
        // The burst continues over the neighbour, which was never armed.
        let events = right.tick(
            &tick(ScrollDirection::Right, 10),
            ModifierState::NONE,
            Point::ZERO,
        );
        assert!(!kinds(&events).contains(&GestureKind::HorizontalPage));
        assert!(left.is_armed());
    }

    #[test]
    fn test_modifier_mapping() {
        let context = WheelDebounceContext::shared();
        let mut wheel = debouncer(&context);
        let focus = Point::new(4.0, 4.0);

        let ctrl = ModifierState {
            ctrl: true,
            ..ModifierState::NONE
        };
        let events = wheel.tick(&tick(ScrollDirection::Up, 0), ctrl, focus);
        assert_eq!(
            events,
            vec![
                GestureEvent::CtrlWheel {
                    position: focus,
                    scale: 1.0 / 1.1
                },
                GestureEvent::Zoom {
                    focus,
                    scale: 1.0 / 1.1
                },
            ]
        );

        let shift = ModifierState {
            shift: true,
            ..ModifierState::NONE
        };
        let events = wheel.tick(&tick(ScrollDirection::Down, 1000), shift, focus);
        assert_eq!(kinds(&events), vec![GestureKind::ShiftWheel, GestureKind::Pan]);

        let alt = ModifierState {
            alt: true,
            ..ModifierState::NONE
        };
        let events = wheel.tick(&tick(ScrollDirection::Up, 2000), alt, focus);
        assert_eq!(events, vec![GestureEvent::Rotate { focus, angle: 5.0 }]);
        let events = wheel.tick(&tick(ScrollDirection::Down, 3000), alt, focus);
        assert_eq!(events, vec![GestureEvent::Rotate { focus, angle: -5.0 }]);
    }

    #[test]
    fn test_modifier_precedence() {
        let context = WheelDebounceContext::shared();
        let mut wheel = debouncer(&context);
        let all = ModifierState {
            ctrl: true,
            shift: true,
            alt: true,
        };
        let events = wheel.tick(&tick(ScrollDirection::Down, 0), all, Point::ZERO);
        assert_eq!(kinds(&events), vec![GestureKind::CtrlWheel, GestureKind::Zoom]);

        let shift_alt = ModifierState {
            shift: true,
            alt: true,
            ..ModifierState::NONE
        };
        let events = wheel.tick(&tick(ScrollDirection::Down, 1000), shift_alt, Point::ZERO);
        assert_eq!(kinds(&events), vec![GestureKind::ShiftWheel, GestureKind::Pan]);
    }

    #[test]
    fn test_horizontal_ticks_pan() {
        let context = WheelDebounceContext::shared();
        let mut wheel = debouncer(&context);

        let left = wheel.tick(&tick(ScrollDirection::Left, 0), ModifierState::NONE, Point::ZERO);
        assert_eq!(
            left[0],
            GestureEvent::ShiftWheel {
                position: Point::ZERO,
                scale: 1.0 / 1.1
            }
        );
        assert!(matches!(left[1], GestureEvent::Pan { delta_x, velocity, .. }
            if delta_x < 0.0 && velocity == 0.0));

        // Ctrl does not turn a horizontal tick into a zoom.
        let ctrl = ModifierState {
            ctrl: true,
            ..ModifierState::NONE
        };
        let right = wheel.tick(&tick(ScrollDirection::Right, 100), ctrl, Point::ZERO);
        assert!(matches!(right[1], GestureEvent::Pan { delta_x, velocity, .. }
            if delta_x > 0.0 && velocity > 0.0));
    }

    #[test]
    fn test_continuous_velocity() {
        let context = WheelDebounceContext::shared();
        let config = GestureConfig::desktop().with_dpi(100.0);
        let mut wheel = WheelDebouncer::new(Arc::clone(&context), &config);

        wheel.tick(&tick(ScrollDirection::Down, 0), ModifierState::NONE, Point::ZERO);
        let events = wheel.tick(
            &tick(ScrollDirection::Down, 100),
            ModifierState::NONE,
            Point::ZERO,
        );
        let Some(GestureEvent::Scroll { velocity, .. }) = events.last().copied() else {
            panic!("expected a scroll, got {events:?}");
        };
        // 40 px over 100 ms at 100 dpi.
        assert!((velocity - 4.0).abs() < 1e-4);
    }
}
