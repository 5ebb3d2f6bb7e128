//! Logging and observability
//!
//! Structured logging with:
//! - Configurable log levels
//! - Console output on stderr
//! - Optional JSON file logging with rotation
//!
//! Submission attempts are logged with an `attempt_id` so the lines of one
//! attempt can be correlated. Credentials are never logged.

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

use std::time::Duration;

/// Milliseconds for a log field, saturating at `u64::MAX`
pub fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Log the start of a submission attempt
///
/// # Example
///
/// ```no_run
/// use intake::log_submission_start;
///
/// let attempt_id = uuid::Uuid::new_v4();
/// log_submission_start!(attempt_id, "http://localhost:5000/api/patients");
/// ```
#[macro_export]
macro_rules! log_submission_start {
    ($attempt_id:expr, $endpoint:expr) => {
        tracing::info!(
            attempt_id = %$attempt_id,
            endpoint = %$endpoint,
            "Submitting patient"
        );
    };
}

/// Log a failed submission attempt
///
/// # Example
///
/// ```no_run
/// use intake::log_submission_failure;
/// use intake::domain::TransportError;
/// use std::time::Duration;
///
/// let attempt_id = uuid::Uuid::new_v4();
/// let error = TransportError::Rejected { status: 500, message: None };
/// log_submission_failure!(attempt_id, error, Duration::from_millis(120));
/// ```
#[macro_export]
macro_rules! log_submission_failure {
    ($attempt_id:expr, $error:expr, $duration:expr) => {
        tracing::warn!(
            attempt_id = %$attempt_id,
            error = %$error,
            status = ?$error.status(),
            duration_ms = $crate::logging::duration_ms($duration),
            "Patient submission failed"
        );
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_ms() {
        assert_eq!(duration_ms(Duration::from_millis(1500)), 1500);
        assert_eq!(duration_ms(Duration::ZERO), 0);
    }

    #[test]
    fn test_duration_ms_saturates() {
        assert_eq!(duration_ms(Duration::MAX), u64::MAX);
    }
}
