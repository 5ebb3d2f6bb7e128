//! Core logic of the intake client.
//!
//! # Modules
//!
//! - [`draft`] - Draft store holding the record under construction
//! - [`validation`] - Ordered required-field rules
//! - [`submission`] - Submission controller, state machine and navigation
//!
//! # Submission Workflow
//!
//! 1. **Edit**: each edit updates the draft and clears the displayed error
//! 2. **Validate**: a submit validates a snapshot; the first missing required
//!    field is reported and nothing is sent
//! 3. **Submit**: the snapshot is posted with the bearer credential
//! 4. **Succeed**: the draft is reset and navigation is scheduled after the
//!    success delay
//! 5. **Fail**: the error is shown and the draft is kept for a retry

pub mod draft;
pub mod submission;
pub mod validation;
