//! Core systems for Tactile.
//!
//! This crate provides the infrastructure the gesture engine is built on:
//!
//! - **Geometry**: [`Point`], [`Size`] and [`Rect`] in host coordinates
//! - **Clocks**: the [`Clock`] abstraction over a monotonic time source, with
//!   [`MonotonicClock`] for real hosts and [`ManualClock`] for deterministic tests
//! - **Timers**: a deadline-ordered, one-shot [`TimerManager`] with idempotent
//!   cancellation, driven cooperatively by the host
//! - **Errors**: [`TactileError`] and [`TimerError`]
//! - **Logging**: `tracing` targets and span helpers in [`logging`]
//!
//! # Timer Example
//!
//! ```
//! use std::time::Duration;
//! use tactile_core::TimerManager;
//!
//! let mut timers = TimerManager::new();
//! let now = Duration::ZERO;
//!
//! let long_press = timers.start_one_shot(now, Duration::from_millis(400), "long press");
//! let tap = timers.start_one_shot(now, Duration::from_millis(250), "tap");
//!
//! // The host asks when to wake up next.
//! assert_eq!(timers.next_deadline(), Some(Duration::from_millis(250)));
//!
//! // Cancelling twice is harmless.
//! timers.cancel(long_press);
//! timers.cancel(long_press);
//!
//! let fired = timers.pop_expired(Duration::from_millis(500));
//! assert_eq!(fired, Some((tap, "tap")));
//! assert_eq!(timers.pop_expired(Duration::from_millis(500)), None);
//! ```

mod clock;
mod error;
mod geometry;
pub mod logging;
mod timer;

pub use clock::{Clock, ManualClock, MonotonicClock, Timestamp};
pub use error::{Result, TactileError, TimerError};
pub use geometry::{Point, Rect, Size};
pub use logging::PerfSpan;
pub use timer::{TimerId, TimerManager};
