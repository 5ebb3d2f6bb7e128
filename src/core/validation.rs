//! Required-field validation
//!
//! Rules run in a fixed order and stop at the first failure. Only presence is
//! checked; format correctness is left to the patient service.

use crate::domain::{PatientDraft, PatientField, ValidationError};

/// Ordered required-field rules
///
/// Text fields are checked after trimming whitespace; selections (gender,
/// date of birth) only need to be non-empty.
const RULES: [(PatientField, bool, ValidationError); 6] = [
    (PatientField::FirstName, true, ValidationError::FirstNameRequired),
    (PatientField::LastName, true, ValidationError::LastNameRequired),
    (PatientField::Email, true, ValidationError::EmailRequired),
    (PatientField::Phone, true, ValidationError::PhoneRequired),
    (PatientField::Gender, false, ValidationError::GenderRequired),
    (PatientField::DateOfBirth, false, ValidationError::DateOfBirthRequired),
];

/// Validates a draft snapshot
///
/// # Errors
///
/// Returns the first failing rule's [`ValidationError`].
pub fn validate(draft: &PatientDraft) -> Result<(), ValidationError> {
    for (field, trimmed, error) in RULES {
        let value = draft.get(field);
        let present = if trimmed {
            !value.trim().is_empty()
        } else {
            !value.is_empty()
        };
        if !present {
            return Err(error);
        }
    }
    Ok(())
}
