//! Submission lifecycle
//!
//! - [`controller`] - The form state and submission controller
//! - [`state`] - Submission state, render view and outcomes
//! - [`schedule`] - Delayed, cancellable navigation after success

pub mod controller;
pub mod schedule;
pub mod state;

pub use controller::{ControllerSettings, SubmissionController};
pub use schedule::ScheduledNavigation;
pub use state::{FormView, SubmissionReceipt, SubmissionState, SubmitOutcome};
