//! Submission state, render view and attempt outcomes

use crate::domain::{PatientDraft, TransportError, ValidationError};
use chrono::{DateTime, Utc};
use std::fmt;
use uuid::Uuid;

/// Lifecycle of the most recent submission attempt
///
/// `Succeeded` and `Failed` are not terminal: a new attempt re-validates and
/// passes through `Submitting` again.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded(String),
    Failed(String),
}

impl SubmissionState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionState::Submitting)
    }

    /// Confirmation or failure text, if the state carries one
    pub fn message(&self) -> Option<&str> {
        match self {
            SubmissionState::Succeeded(message) | SubmissionState::Failed(message) => {
                Some(message)
            }
            _ => None,
        }
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmissionState::Idle => write!(f, "idle"),
            SubmissionState::Submitting => write!(f, "submitting"),
            SubmissionState::Succeeded(_) => write!(f, "succeeded"),
            SubmissionState::Failed(_) => write!(f, "failed"),
        }
    }
}

/// Everything a presentation layer needs to render the form
///
/// Local validation errors and transport failures share the `error` slot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormView {
    pub draft: PatientDraft,
    pub state: SubmissionState,
    pub error: Option<String>,
    pub success: Option<String>,
}

impl FormView {
    /// True while a request is in flight
    pub fn is_loading(&self) -> bool {
        self.state.is_submitting()
    }
}

/// Result of a successful submission
#[derive(Debug, Clone)]
pub struct SubmissionReceipt {
    /// Correlates log lines of one attempt
    pub attempt_id: Uuid,
    /// Confirmation shown to the user
    pub message: String,
    /// The snapshot that was sent
    pub submitted: PatientDraft,
    /// Parsed JSON body returned by the service
    pub response: serde_json::Value,
    pub completed_at: DateTime<Utc>,
}

/// What a single `submit` call did
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// Local validation failed; nothing was sent
    Rejected(ValidationError),
    /// Another attempt was already in flight; nothing was sent
    Ignored,
    Succeeded(SubmissionReceipt),
    Failed {
        attempt_id: Uuid,
        error: TransportError,
        /// Text placed in the error slot
        message: String,
    },
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Succeeded(_))
    }

    /// Whether the transport was invoked for this call
    pub fn reached_transport(&self) -> bool {
        matches!(
            self,
            SubmitOutcome::Succeeded(_) | SubmitOutcome::Failed { .. }
        )
    }
}

/// Confirmation text for a successfully submitted draft
pub fn success_message(draft: &PatientDraft) -> String {
    format!("Patient {} added successfully!", draft.full_name())
}
