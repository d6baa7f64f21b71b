//! Validation engine for the application draft.
//!
//! `validate` is a pure function of the draft, the skill set and the raw
//! portfolio-link slots. Rules run in a fixed order and every violation is
//! reported; the first entry is the field the form focuses.

pub mod patterns;

use serde::{Deserialize, Serialize};

use crate::editing::{project_for_submission, SkillSet};
use crate::models::{ApplicationDraft, FieldId};

use patterns::{is_blank, looks_like_email, looks_like_url};

pub const FULL_NAME_MAX: usize = 100;
pub const SUMMARY_MIN: usize = 50;
pub const SUMMARY_MAX: usize = 2000;
pub const UK_CLIENTS_DETAILS_MAX: usize = 1000;
pub const INTEREST_MIN: usize = 50;
pub const INTEREST_MAX: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: FieldId,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: FieldId, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Runs every rule against the snapshot, in evaluation order.
pub fn validate(
    draft: &ApplicationDraft,
    skills: &SkillSet,
    portfolio_links: &[String],
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut fail = |field: FieldId, message: &str| errors.push(ValidationError::new(field, message));

    if is_blank(&draft.full_name) {
        fail(FieldId::FullName, "Full name is required");
    } else if text_len(&draft.full_name) > FULL_NAME_MAX {
        fail(FieldId::FullName, "Full name cannot exceed 100 characters");
    }

    if is_blank(&draft.email) {
        fail(FieldId::Email, "Email is required");
    } else if !looks_like_email(&draft.email) {
        fail(FieldId::Email, "Please enter a valid email address");
    }

    if is_blank(&draft.phone) {
        fail(FieldId::Phone, "Phone number is required");
    }

    if is_blank(&draft.location) {
        fail(FieldId::Location, "Location is required");
    }

    if draft.primary_role.is_none() {
        fail(FieldId::PrimaryRole, "Primary role is required");
    } else if draft.wants_custom_role() && is_blank(&draft.custom_role) {
        fail(
            FieldId::CustomRole,
            "Custom role is required when selecting \"Other\"",
        );
    }

    if draft.experience.is_none() {
        fail(FieldId::Experience, "Experience is required");
    }

    if skills.is_empty() {
        fail(FieldId::Skills, "At least one skill is required");
    }

    // One error per malformed link, all tagged to the portfolio group.
    for link in project_for_submission(portfolio_links) {
        if !looks_like_url(&link) {
            fail(FieldId::Portfolio, "All portfolio links must be valid URLs");
        }
    }

    if draft.availability.is_none() {
        fail(FieldId::Availability, "Availability is required");
    }

    if draft.uk_hours.is_none() {
        fail(FieldId::UkHours, "UK hours preference is required");
    }

    if draft.office_work.is_none() {
        fail(FieldId::OfficeWork, "Office work preference is required");
    }

    if draft.salary_range.is_none() {
        fail(FieldId::SalaryRange, "Salary range is required");
    }

    // Optional, but bounded once the candidate writes anything.
    if !is_blank(&draft.summary) {
        let len = text_len(&draft.summary);
        if len < SUMMARY_MIN {
            fail(FieldId::Summary, "Summary must be at least 50 characters");
        } else if len > SUMMARY_MAX {
            fail(FieldId::Summary, "Summary cannot exceed 2000 characters");
        }
    }

    if draft.uk_clients.is_none() {
        fail(FieldId::UkClients, "UK clients experience is required");
    } else if draft.has_uk_clients() && text_len(&draft.uk_clients_details) > UK_CLIENTS_DETAILS_MAX
    {
        fail(
            FieldId::UkClientsDetails,
            "UK clients details cannot exceed 1000 characters",
        );
    }

    if is_blank(&draft.interest) {
        fail(FieldId::Interest, "Interest statement is required");
    } else {
        let len = text_len(&draft.interest);
        if len < INTEREST_MIN {
            fail(
                FieldId::Interest,
                "Interest statement must be at least 50 characters",
            );
        } else if len > INTEREST_MAX {
            fail(
                FieldId::Interest,
                "Interest statement cannot exceed 1000 characters",
            );
        }
    }

    if !draft.accuracy_consent {
        fail(FieldId::AccuracyConsent, "Accuracy consent must be accepted");
    }

    if !draft.data_consent {
        fail(FieldId::DataConsent, "Data consent must be accepted");
    }

    errors
}

/// Length as the backend counts it (UTF-16 code units), untrimmed.
fn text_len(value: &str) -> usize {
    value.encode_utf16().count()
}

/// Ordered error list with per-field lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<ValidationError>,
}

impl FieldErrors {
    pub fn new(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    /// The focus target.
    pub fn first(&self) -> Option<&ValidationError> {
        self.errors.first()
    }

    pub fn has_error(&self, field: FieldId) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn message_for(&self, field: FieldId) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn clear_field(&mut self, field: FieldId) {
        self.errors.retain(|e| e.field != field);
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn as_slice(&self) -> &[ValidationError] {
        &self.errors
    }
}
