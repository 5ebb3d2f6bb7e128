//! Domain error types
//!
//! This module defines the error hierarchy for the intake client.
//! Errors are domain-specific and don't expose third-party HTTP client types.

use thiserror::Error;

/// Fallback text shown when a failed submission carries no usable message.
pub const GENERIC_SUBMISSION_FAILURE: &str = "Failed to add patient. Please try again.";

/// Main intake error type
///
/// This is the primary error type used throughout the crate outside of the
/// submission controller, which never returns errors and only updates its
/// error slot.
#[derive(Debug, Error)]
pub enum IntakeError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Required-field validation failed
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Patient service transport errors
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Unknown form field name
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Local required-field validation failure
///
/// The `Display` output of each variant is the exact message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("First name is required")]
    FirstNameRequired,

    #[error("Last name is required")]
    LastNameRequired,

    #[error("Email is required")]
    EmailRequired,

    #[error("Phone number is required")]
    PhoneRequired,

    #[error("Gender is required")]
    GenderRequired,

    #[error("Date of birth is required")]
    DateOfBirthRequired,
}

/// Patient service transport errors
///
/// Errors that occur while submitting a draft to the remote patient service.
/// These errors don't expose `reqwest` types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Failed to reach the patient service
    #[error("Failed to connect to patient service: {0}")]
    ConnectionFailed(String),

    /// The request did not complete in time
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Non-2xx response
    #[error("Patient service rejected the request: {status}")]
    Rejected {
        status: u16,
        /// Message extracted from the response body, if any
        message: Option<String>,
    },

    /// 2xx response whose body is not JSON
    #[error("Invalid response from patient service: {0}")]
    InvalidResponse(String),
}

impl TransportError {
    /// Message to surface to the user, if the failure carries one
    ///
    /// Rejections only carry a message when the service supplied one in the
    /// response body. Callers fall back to [`GENERIC_SUBMISSION_FAILURE`].
    pub fn user_message(&self) -> Option<String> {
        match self {
            TransportError::Rejected { message, .. } => message
                .as_deref()
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_string),
            other => Some(other.to_string()),
        }
    }

    /// HTTP status code, when the service answered
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for IntakeError {
    fn from(err: std::io::Error) -> Self {
        IntakeError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for IntakeError {
    fn from(err: serde_json::Error) -> Self {
        IntakeError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for IntakeError {
    fn from(err: toml::de::Error) -> Self {
        IntakeError::Configuration(format!("TOML parse error: {err}"))
    }
}
