//! Result type alias for the intake crate

use super::errors::IntakeError;

/// Result type alias for intake operations
///
/// # Examples
///
/// ```
/// use intake::domain::result::Result;
/// use intake::domain::errors::IntakeError;
///
/// fn failing_function() -> Result<()> {
///     Err(IntakeError::Configuration("missing base_url".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, IntakeError>;
