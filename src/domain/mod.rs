//! Domain models and types for the intake client.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Draft model** ([`PatientDraft`], [`PatientField`], [`Section`])
//! - **Choice option sets** ([`Gender`], [`MaritalStatus`], [`BloodGroup`])
//! - **Error types** ([`IntakeError`], [`ValidationError`], [`TransportError`])
//! - **Result type alias** ([`Result`])
//!
//! # Field Identity
//!
//! Fields are addressed by [`PatientField`]. Its wire name is used for edits,
//! validation and the JSON payload alike:
//!
//! ```rust
//! use intake::domain::{PatientDraft, PatientField};
//! use std::str::FromStr;
//!
//! let field = PatientField::from_str("firstName").unwrap();
//! let draft = PatientDraft::new().with(field, "Jane");
//! assert_eq!(draft.first_name, "Jane");
//! ```

pub mod choices;
pub mod errors;
pub mod patient;
pub mod result;

// Re-export commonly used types for convenience
pub use choices::{BloodGroup, Gender, MaritalStatus};
pub use errors::{IntakeError, TransportError, ValidationError, GENERIC_SUBMISSION_FAILURE};
pub use patient::{PatientDraft, PatientField, Section};
pub use result::Result;
