//! Logging facilities for Tactile.
//!
//! Tactile uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("tactile=debug,tactile_core::timer=trace")
//!         .init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! State transitions are logged at `debug`, timer activity at `trace`, and
//! filtered input noise at `debug`.

/// Span names used throughout Tactile for tracing.
pub mod span_names {
    /// One contact or wheel event processed by a recognizer.
    pub const RECOGNIZER_STEP: &str = "tactile::step";
    /// Expired timers being fired.
    pub const TIMER_POLL: &str = "tactile::timer_poll";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "tactile_core";
    /// Timer system target.
    pub const TIMER: &str = "tactile_core::timer";
    /// Gesture state machine target.
    pub const RECOGNIZER: &str = "tactile::recognizer";
    /// Contact registry and noise filter target.
    pub const REGISTRY: &str = "tactile::registry";
    /// Wheel debouncing target.
    pub const WHEEL: &str = "tactile::wheel";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Useful for measuring how long a recognizer step takes.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::trace_span!(target: "tactile::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

/// Trace-level log with the core target.
#[macro_export]
macro_rules! tactile_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "tactile_core", $($arg)*)
    };
}
