//! Draft store
//!
//! Holds the record under construction and applies field-level edits.

use crate::domain::{IntakeError, PatientDraft, PatientField, Result};
use std::str::FromStr;

/// Mutable owner of the in-progress [`PatientDraft`]
#[derive(Debug, Default)]
pub struct DraftStore {
    draft: PatientDraft,
}

impl DraftStore {
    /// Creates a store holding an empty draft
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a single field; never validates and never fails
    pub fn update(&mut self, field: PatientField, value: impl Into<String>) {
        self.draft.set(field, value);
    }

    /// Sets a field addressed by its wire name
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::UnknownField`] without touching the draft when
    /// `name` is not a known field.
    pub fn update_by_name(&mut self, name: &str, value: impl Into<String>) -> Result<PatientField> {
        let field =
            PatientField::from_str(name).map_err(|_| IntakeError::UnknownField(name.to_string()))?;
        self.update(field, value);
        Ok(field)
    }

    /// Returns every field to its empty default
    pub fn reset(&mut self) {
        self.draft = PatientDraft::default();
    }

    /// Owned copy of the current values
    pub fn snapshot(&self) -> PatientDraft {
        self.draft.clone()
    }

    /// Borrowed view of the current values
    pub fn current(&self) -> &PatientDraft {
        &self.draft
    }
}
