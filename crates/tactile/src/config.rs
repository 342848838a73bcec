//! Recognizer tunables.

use std::time::Duration;

use tactile_core::{Result, TactileError};

/// Default long-press delay in milliseconds.
pub const DEFAULT_LONG_PRESS_MS: u64 = 400;

/// Default maximum time between the downs of a double tap, in milliseconds.
pub const DEFAULT_DOUBLE_TAP_TIME_MS: u64 = 250;

/// Default maximum distance between the downs of a double tap, in pixels.
///
/// Also the radius a contact may drift and still become a long press.
pub const DEFAULT_DOUBLE_TAP_DISTANCE: f32 = 20.0;

/// Default swipe window in milliseconds.
pub const DEFAULT_SWIPE_TIME_MS: u64 = 300;

/// Default swipe velocity threshold in inches per second.
pub const DEFAULT_SWIPE_VELOCITY: f32 = 5.0;

/// Default ratio applied per wheel tick.
pub const DEFAULT_WHEEL_SENSITIVITY: f32 = 1.1;

/// Default desktop display density.
pub const DEFAULT_DESKTOP_DPI: f32 = 96.0;

/// Default mobile display density.
pub const DEFAULT_MOBILE_DPI: f32 = 160.0;

/// Default touch slop on touch-primary platforms, in pixels.
pub const DEFAULT_MOBILE_MOVE_JITTER: f32 = 2.0;

/// Pixels one wheel tick stands for when turned into scroll or pan deltas.
pub const DEFAULT_WHEEL_TICK_DISTANCE: f32 = 40.0;

/// Degrees one alt-wheel tick rotates by.
pub const DEFAULT_WHEEL_ROTATE_STEP: f32 = 5.0;

/// Ticks closer together than this count as one burst, in milliseconds.
pub const DEFAULT_WHEEL_PAGE_BURST_MS: u64 = 40;

/// Quiet time after which the wheel may page again, in milliseconds.
pub const DEFAULT_WHEEL_PAGE_IDLE_MS: u64 = 500;

/// Tunables for a [`GestureRecognizer`](crate::GestureRecognizer).
///
/// `Default` is the desktop preset. Use [`GestureConfig::mobile`] on
/// touch-primary platforms, where the single-tap window is doubled to leave
/// room for slower double taps.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GestureConfig {
    /// Maximum time between the downs of a double tap.
    pub double_tap_time: Duration,
    /// Maximum distance between the downs of a double tap, in pixels.
    pub double_tap_distance: f32,
    /// How long a contact must stay put to become a long press.
    pub long_press_delay: Duration,
    /// Window after contact-down in which a fast move is a swipe.
    pub swipe_time: Duration,
    /// Swipe threshold in inches per second.
    pub swipe_velocity: f32,
    /// Display dots-per-inch.
    pub dpi: f32,
    /// Touch is the primary input. Doubles the single-tap window.
    pub touch_primary: bool,
    /// Touch slop: a press that stays within this radius of its down
    /// position is not a move. Zero reacts to any displacement.
    pub move_jitter: f32,
    pub wheel_sensitivity: f32,
    pub wheel_tick_distance: f32,
    pub wheel_rotate_step: f32,
    pub wheel_page_burst: Duration,
    pub wheel_page_idle: Duration,
    /// Treat the command (meta) key as ctrl.
    pub command_is_ctrl: bool,
    /// Treat caps lock as alt, for keyboards without a usable alt key.
    pub lock_is_alt: bool,
}

impl GestureConfig {
    /// Preset for mouse-and-keyboard platforms.
    pub fn desktop() -> Self {
        Self {
            double_tap_time: Duration::from_millis(DEFAULT_DOUBLE_TAP_TIME_MS),
            double_tap_distance: DEFAULT_DOUBLE_TAP_DISTANCE,
            long_press_delay: Duration::from_millis(DEFAULT_LONG_PRESS_MS),
            swipe_time: Duration::from_millis(DEFAULT_SWIPE_TIME_MS),
            swipe_velocity: DEFAULT_SWIPE_VELOCITY,
            dpi: DEFAULT_DESKTOP_DPI,
            touch_primary: false,
            move_jitter: 0.0,
            wheel_sensitivity: DEFAULT_WHEEL_SENSITIVITY,
            wheel_tick_distance: DEFAULT_WHEEL_TICK_DISTANCE,
            wheel_rotate_step: DEFAULT_WHEEL_ROTATE_STEP,
            wheel_page_burst: Duration::from_millis(DEFAULT_WHEEL_PAGE_BURST_MS),
            wheel_page_idle: Duration::from_millis(DEFAULT_WHEEL_PAGE_IDLE_MS),
            command_is_ctrl: true,
            lock_is_alt: false,
        }
    }

    /// Preset for touch-primary platforms.
    pub fn mobile() -> Self {
        Self {
            dpi: DEFAULT_MOBILE_DPI,
            touch_primary: true,
            move_jitter: DEFAULT_MOBILE_MOVE_JITTER,
            command_is_ctrl: false,
            ..Self::desktop()
        }
    }

    /// How long a lone tap waits for a second one before it is reported.
    pub fn single_tap_window(&self) -> Duration {
        if self.touch_primary {
            self.double_tap_time * 2
        } else {
            self.double_tap_time
        }
    }

    /// Set the display density.
    pub fn with_dpi(mut self, dpi: f32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Set the double-tap window and radius.
    pub fn with_double_tap(mut self, time: Duration, distance: f32) -> Self {
        self.double_tap_time = time;
        self.double_tap_distance = distance;
        self
    }

    /// Set the long-press delay.
    pub fn with_long_press_delay(mut self, delay: Duration) -> Self {
        self.long_press_delay = delay;
        self
    }

    /// Set the swipe window and velocity threshold.
    pub fn with_swipe(mut self, time: Duration, velocity: f32) -> Self {
        self.swipe_time = time;
        self.swipe_velocity = velocity;
        self
    }

    /// Set the touch slop radius.
    pub fn with_move_jitter(mut self, jitter: f32) -> Self {
        self.move_jitter = jitter;
        self
    }

    /// Mark touch as the primary input.
    pub fn with_touch_primary(mut self, touch_primary: bool) -> Self {
        self.touch_primary = touch_primary;
        self
    }

    /// Check that every tunable is usable.
    pub fn validate(&self) -> Result<()> {
        positive("dpi", self.dpi)?;
        positive("swipe_velocity", self.swipe_velocity)?;
        positive("wheel_tick_distance", self.wheel_tick_distance)?;
        non_negative("double_tap_distance", self.double_tap_distance)?;
        non_negative("move_jitter", self.move_jitter)?;
        if !self.wheel_rotate_step.is_finite() {
            return Err(TactileError::invalid_value(
                "wheel_rotate_step",
                "must be finite",
            ));
        }
        if !(self.wheel_sensitivity.is_finite() && self.wheel_sensitivity > 1.0) {
            return Err(TactileError::invalid_value(
                "wheel_sensitivity",
                format!("must be greater than 1, got {}", self.wheel_sensitivity),
            ));
        }
        non_zero("double_tap_time", self.double_tap_time)?;
        non_zero("long_press_delay", self.long_press_delay)?;
        non_zero("swipe_time", self.swipe_time)?;
        if self.wheel_page_burst >= self.wheel_page_idle {
            return Err(TactileError::invalid_value(
                "wheel_page_burst",
                "must be shorter than wheel_page_idle",
            ));
        }
        Ok(())
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self::desktop()
    }
}

fn positive(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TactileError::invalid_value(
            name,
            format!("must be positive, got {value}"),
        ))
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(TactileError::invalid_value(
            name,
            format!("must not be negative, got {value}"),
        ))
    }
}

fn non_zero(name: &'static str, value: Duration) -> Result<()> {
    if value.is_zero() {
        Err(TactileError::invalid_value(name, "must not be zero"))
    } else {
        Ok(())
    }
}
