//! Patient draft model
//!
//! A [`PatientDraft`] is the flat, all-text record a user composes before
//! submission. Every field is addressed by a [`PatientField`], whose wire name
//! doubles as the JSON key sent to the patient service.

use super::choices::{BloodGroup, Gender, MaritalStatus};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Form section a field is displayed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Identity,
    Contact,
    Medical,
    Emergency,
    Insurance,
}

impl Section {
    /// All sections in display order
    pub const ALL: [Section; 5] = [
        Section::Identity,
        Section::Contact,
        Section::Medical,
        Section::Emergency,
        Section::Insurance,
    ];

    /// Human-readable section title
    pub fn title(&self) -> &'static str {
        match self {
            Section::Identity => "Personal Information",
            Section::Contact => "Contact Information",
            Section::Medical => "Medical Information",
            Section::Emergency => "Emergency Contact",
            Section::Insurance => "Insurance Information",
        }
    }

    /// Fields belonging to this section, in display order
    pub fn fields(&self) -> impl Iterator<Item = PatientField> + '_ {
        PatientField::ALL
            .into_iter()
            .filter(move |field| field.section() == *self)
    }
}

/// Identity of a single draft field
///
/// The field is both the mutation key used by edits and the key used by
/// validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatientField {
    FirstName,
    LastName,
    DateOfBirth,
    Gender,
    MaritalStatus,
    Occupation,
    Email,
    Phone,
    Address,
    City,
    State,
    ZipCode,
    BloodGroup,
    Allergies,
    MedicalHistory,
    CurrentMedications,
    EmergencyContactName,
    EmergencyContactPhone,
    InsuranceProvider,
    InsurancePolicyNumber,
}

impl PatientField {
    /// Every field, grouped by section
    pub const ALL: [PatientField; 20] = [
        PatientField::FirstName,
        PatientField::LastName,
        PatientField::DateOfBirth,
        PatientField::Gender,
        PatientField::MaritalStatus,
        PatientField::Occupation,
        PatientField::Email,
        PatientField::Phone,
        PatientField::Address,
        PatientField::City,
        PatientField::State,
        PatientField::ZipCode,
        PatientField::BloodGroup,
        PatientField::Allergies,
        PatientField::MedicalHistory,
        PatientField::CurrentMedications,
        PatientField::EmergencyContactName,
        PatientField::EmergencyContactPhone,
        PatientField::InsuranceProvider,
        PatientField::InsurancePolicyNumber,
    ];

    /// Wire name of the field (JSON key)
    pub fn as_str(&self) -> &'static str {
        match self {
            PatientField::FirstName => "firstName",
            PatientField::LastName => "lastName",
            PatientField::DateOfBirth => "dateOfBirth",
            PatientField::Gender => "gender",
            PatientField::MaritalStatus => "maritalStatus",
            PatientField::Occupation => "occupation",
            PatientField::Email => "email",
            PatientField::Phone => "phone",
            PatientField::Address => "address",
            PatientField::City => "city",
            PatientField::State => "state",
            PatientField::ZipCode => "zipCode",
            PatientField::BloodGroup => "bloodGroup",
            PatientField::Allergies => "allergies",
            PatientField::MedicalHistory => "medicalHistory",
            PatientField::CurrentMedications => "currentMedications",
            PatientField::EmergencyContactName => "emergencyContactName",
            PatientField::EmergencyContactPhone => "emergencyContactPhone",
            PatientField::InsuranceProvider => "insuranceProvider",
            PatientField::InsurancePolicyNumber => "insurancePolicyNumber",
        }
    }

    /// Label shown next to the input
    pub fn label(&self) -> &'static str {
        match self {
            PatientField::FirstName => "First Name",
            PatientField::LastName => "Last Name",
            PatientField::DateOfBirth => "Date of Birth",
            PatientField::Gender => "Gender",
            PatientField::MaritalStatus => "Marital Status",
            PatientField::Occupation => "Occupation",
            PatientField::Email => "Email",
            PatientField::Phone => "Phone Number",
            PatientField::Address => "Street Address",
            PatientField::City => "City",
            PatientField::State => "State",
            PatientField::ZipCode => "ZIP Code",
            PatientField::BloodGroup => "Blood Group",
            PatientField::Allergies => "Allergies",
            PatientField::MedicalHistory => "Medical History",
            PatientField::CurrentMedications => "Current Medications",
            PatientField::EmergencyContactName => "Emergency Contact Name",
            PatientField::EmergencyContactPhone => "Emergency Contact Phone",
            PatientField::InsuranceProvider => "Insurance Provider",
            PatientField::InsurancePolicyNumber => "Policy Number",
        }
    }

    pub fn section(&self) -> Section {
        match self {
            PatientField::FirstName
            | PatientField::LastName
            | PatientField::DateOfBirth
            | PatientField::Gender
            | PatientField::MaritalStatus
            | PatientField::Occupation => Section::Identity,
            PatientField::Email
            | PatientField::Phone
            | PatientField::Address
            | PatientField::City
            | PatientField::State
            | PatientField::ZipCode => Section::Contact,
            PatientField::BloodGroup
            | PatientField::Allergies
            | PatientField::MedicalHistory
            | PatientField::CurrentMedications => Section::Medical,
            PatientField::EmergencyContactName | PatientField::EmergencyContactPhone => {
                Section::Emergency
            }
            PatientField::InsuranceProvider | PatientField::InsurancePolicyNumber => {
                Section::Insurance
            }
        }
    }

    /// Whether submission is blocked while this field is empty
    pub fn is_required(&self) -> bool {
        matches!(
            self,
            PatientField::FirstName
                | PatientField::LastName
                | PatientField::Email
                | PatientField::Phone
                | PatientField::Gender
                | PatientField::DateOfBirth
        )
    }

    /// Known options for choice fields
    ///
    /// Options are presentation hints only. Values outside the list are still
    /// accepted and left to the patient service to judge.
    pub fn choices(&self) -> Option<Vec<&'static str>> {
        match self {
            PatientField::Gender => Some(Gender::ALL.iter().map(|g| g.as_str()).collect()),
            PatientField::MaritalStatus => {
                Some(MaritalStatus::ALL.iter().map(|m| m.as_str()).collect())
            }
            PatientField::BloodGroup => Some(BloodGroup::ALL.iter().map(|b| b.as_str()).collect()),
            _ => None,
        }
    }
}

impl fmt::Display for PatientField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PatientField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PatientField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("Unknown patient field '{s}'"))
    }
}

/// In-progress patient record
///
/// All values are text pending remote validation, and every field defaults to
/// the empty string. Serializes to a flat JSON object with all 20 keys present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientDraft {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub marital_status: String,
    pub occupation: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub blood_group: String,
    pub allergies: String,
    pub medical_history: String,
    pub current_medications: String,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub insurance_provider: String,
    pub insurance_policy_number: String,
}

impl PatientDraft {
    /// Creates an empty draft
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a field value
    pub fn get(&self, field: PatientField) -> &str {
        self.slot(field)
    }

    /// Replaces a field value
    pub fn set(&mut self, field: PatientField, value: impl Into<String>) {
        *self.slot_mut(field) = value.into();
    }

    /// Builder-style [`set`](Self::set)
    pub fn with(mut self, field: PatientField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// True when every field is empty
    pub fn is_empty(&self) -> bool {
        PatientField::ALL
            .into_iter()
            .all(|field| self.get(field).is_empty())
    }

    /// Iterates over `(field, value)` pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (PatientField, &str)> + '_ {
        PatientField::ALL
            .into_iter()
            .map(move |field| (field, self.get(field)))
    }

    /// Display name used in confirmations
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    fn slot(&self, field: PatientField) -> &String {
        match field {
            PatientField::FirstName => &self.first_name,
            PatientField::LastName => &self.last_name,
            PatientField::DateOfBirth => &self.date_of_birth,
            PatientField::Gender => &self.gender,
            PatientField::MaritalStatus => &self.marital_status,
            PatientField::Occupation => &self.occupation,
            PatientField::Email => &self.email,
            PatientField::Phone => &self.phone,
            PatientField::Address => &self.address,
            PatientField::City => &self.city,
            PatientField::State => &self.state,
            PatientField::ZipCode => &self.zip_code,
            PatientField::BloodGroup => &self.blood_group,
            PatientField::Allergies => &self.allergies,
            PatientField::MedicalHistory => &self.medical_history,
            PatientField::CurrentMedications => &self.current_medications,
            PatientField::EmergencyContactName => &self.emergency_contact_name,
            PatientField::EmergencyContactPhone => &self.emergency_contact_phone,
            PatientField::InsuranceProvider => &self.insurance_provider,
            PatientField::InsurancePolicyNumber => &self.insurance_policy_number,
        }
    }

    fn slot_mut(&mut self, field: PatientField) -> &mut String {
        match field {
            PatientField::FirstName => &mut self.first_name,
            PatientField::LastName => &mut self.last_name,
            PatientField::DateOfBirth => &mut self.date_of_birth,
            PatientField::Gender => &mut self.gender,
            PatientField::MaritalStatus => &mut self.marital_status,
            PatientField::Occupation => &mut self.occupation,
            PatientField::Email => &mut self.email,
            PatientField::Phone => &mut self.phone,
            PatientField::Address => &mut self.address,
            PatientField::City => &mut self.city,
            PatientField::State => &mut self.state,
            PatientField::ZipCode => &mut self.zip_code,
            PatientField::BloodGroup => &mut self.blood_group,
            PatientField::Allergies => &mut self.allergies,
            PatientField::MedicalHistory => &mut self.medical_history,
            PatientField::CurrentMedications => &mut self.current_medications,
            PatientField::EmergencyContactName => &mut self.emergency_contact_name,
            PatientField::EmergencyContactPhone => &mut self.emergency_contact_phone,
            PatientField::InsuranceProvider => &mut self.insurance_provider,
            PatientField::InsurancePolicyNumber => &mut self.insurance_policy_number,
        }
    }
}
