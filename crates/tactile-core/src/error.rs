//! Error types for Tactile.
//!
//! Gesture classification itself never fails. Errors only surface at the
//! edges: invalid timer handles and unusable configuration.

/// A specialized Result type for Tactile core operations.
pub type Result<T> = std::result::Result<T, TactileError>;

/// The main error type for Tactile core operations.
#[derive(Debug, thiserror::Error)]
pub enum TactileError {
    /// Timer-related error.
    #[error("Timer error: {0}")]
    Timer(#[from] TimerError),

    /// A configuration value could not be used.
    #[error("Invalid value for '{name}': {message}")]
    InvalidValue {
        /// Name of the offending setting.
        name: &'static str,
        /// Why the value was rejected.
        message: String,
    },
}

impl TactileError {
    /// Create an invalid value error.
    pub fn invalid_value(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            name,
            message: message.into(),
        }
    }
}

/// Timer-specific errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TimerError {
    /// The timer ID is invalid, already fired, or already cancelled.
    #[error("Invalid or expired timer ID")]
    InvalidTimerId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_error_converts() {
        let err: TactileError = TimerError::InvalidTimerId.into();
        assert!(matches!(err, TactileError::Timer(TimerError::InvalidTimerId)));
        assert_eq!(err.to_string(), "Timer error: Invalid or expired timer ID");
    }

    #[test]
    fn test_invalid_value_message() {
        let err = TactileError::invalid_value("dpi", "must be positive");
        assert_eq!(err.to_string(), "Invalid value for 'dpi': must be positive");
    }
}
