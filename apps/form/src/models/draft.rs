use serde::{Deserialize, Serialize};

use crate::errors::EditError;
use crate::models::choices::{
    blank_choice, parse_choice, Availability, ExperienceBracket, OfficeWork, PrimaryRole,
    SalaryRange, UkClients, UkHours,
};
use crate::models::field::FieldId;

/// The in-progress application, exactly as persisted under `draftForm`.
///
/// `portfolio` is derived: it always equals the portfolio-link slots with
/// blank entries removed. It is kept in sync by the form controller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationDraft {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    #[serde(with = "blank_choice")]
    pub primary_role: Option<PrimaryRole>,
    pub custom_role: String,
    #[serde(with = "blank_choice")]
    pub experience: Option<ExperienceBracket>,
    pub portfolio: Vec<String>,
    #[serde(with = "blank_choice")]
    pub availability: Option<Availability>,
    #[serde(with = "blank_choice")]
    pub uk_hours: Option<UkHours>,
    #[serde(with = "blank_choice")]
    pub office_work: Option<OfficeWork>,
    #[serde(with = "blank_choice")]
    pub salary_range: Option<SalaryRange>,
    pub summary: String,
    #[serde(with = "blank_choice")]
    pub uk_clients: Option<UkClients>,
    pub uk_clients_details: String,
    pub interest: String,
    pub accuracy_consent: bool,
    pub data_consent: bool,
}

impl ApplicationDraft {
    pub fn wants_custom_role(&self) -> bool {
        self.primary_role == Some(PrimaryRole::Other)
    }

    pub fn has_uk_clients(&self) -> bool {
        self.uk_clients == Some(UkClients::Yes)
    }

    /// Applies a single field edit. Changing `primaryRole` never discards
    /// an already typed `customRole`.
    pub fn apply(&mut self, edit: FieldEdit) {
        match edit {
            FieldEdit::FullName(v) => self.full_name = v,
            FieldEdit::Email(v) => self.email = v,
            FieldEdit::Phone(v) => self.phone = v,
            FieldEdit::Location(v) => self.location = v,
            FieldEdit::PrimaryRole(v) => self.primary_role = v,
            FieldEdit::CustomRole(v) => self.custom_role = v,
            FieldEdit::Experience(v) => self.experience = v,
            FieldEdit::Availability(v) => self.availability = v,
            FieldEdit::UkHours(v) => self.uk_hours = v,
            FieldEdit::OfficeWork(v) => self.office_work = v,
            FieldEdit::SalaryRange(v) => self.salary_range = v,
            FieldEdit::Summary(v) => self.summary = v,
            FieldEdit::UkClients(v) => self.uk_clients = v,
            FieldEdit::UkClientsDetails(v) => self.uk_clients_details = v,
            FieldEdit::Interest(v) => self.interest = v,
            FieldEdit::AccuracyConsent(v) => self.accuracy_consent = v,
            FieldEdit::DataConsent(v) => self.data_consent = v,
        }
    }
}

/// A typed change to one scalar field of the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    FullName(String),
    Email(String),
    Phone(String),
    Location(String),
    PrimaryRole(Option<PrimaryRole>),
    CustomRole(String),
    Experience(Option<ExperienceBracket>),
    Availability(Option<Availability>),
    UkHours(Option<UkHours>),
    OfficeWork(Option<OfficeWork>),
    SalaryRange(Option<SalaryRange>),
    Summary(String),
    UkClients(Option<UkClients>),
    UkClientsDetails(String),
    Interest(String),
    AccuracyConsent(bool),
    DataConsent(bool),
}

impl FieldEdit {
    pub fn field(&self) -> FieldId {
        match self {
            FieldEdit::FullName(_) => FieldId::FullName,
            FieldEdit::Email(_) => FieldId::Email,
            FieldEdit::Phone(_) => FieldId::Phone,
            FieldEdit::Location(_) => FieldId::Location,
            FieldEdit::PrimaryRole(_) => FieldId::PrimaryRole,
            FieldEdit::CustomRole(_) => FieldId::CustomRole,
            FieldEdit::Experience(_) => FieldId::Experience,
            FieldEdit::Availability(_) => FieldId::Availability,
            FieldEdit::UkHours(_) => FieldId::UkHours,
            FieldEdit::OfficeWork(_) => FieldId::OfficeWork,
            FieldEdit::SalaryRange(_) => FieldId::SalaryRange,
            FieldEdit::Summary(_) => FieldId::Summary,
            FieldEdit::UkClients(_) => FieldId::UkClients,
            FieldEdit::UkClientsDetails(_) => FieldId::UkClientsDetails,
            FieldEdit::Interest(_) => FieldId::Interest,
            FieldEdit::AccuracyConsent(_) => FieldId::AccuracyConsent,
            FieldEdit::DataConsent(_) => FieldId::DataConsent,
        }
    }

    /// Builds an edit from raw text input for `field`.
    ///
    /// Choices accept their exact option string (empty deselects); consents
    /// accept `true/false`, `yes/no`, `y/n`, `1/0`. Skills, portfolio and CV
    /// have their own operations and are rejected here.
    pub fn parse(field: FieldId, raw: &str) -> Result<Self, EditError> {
        let text = raw.to_string();
        let edit = match field {
            FieldId::FullName => FieldEdit::FullName(text),
            FieldId::Email => FieldEdit::Email(text),
            FieldId::Phone => FieldEdit::Phone(text),
            FieldId::Location => FieldEdit::Location(text),
            FieldId::CustomRole => FieldEdit::CustomRole(text),
            FieldId::Summary => FieldEdit::Summary(text),
            FieldId::UkClientsDetails => FieldEdit::UkClientsDetails(text),
            FieldId::Interest => FieldEdit::Interest(text),
            FieldId::PrimaryRole => FieldEdit::PrimaryRole(choice(field, raw)?),
            FieldId::Experience => FieldEdit::Experience(choice(field, raw)?),
            FieldId::Availability => FieldEdit::Availability(choice(field, raw)?),
            FieldId::UkHours => FieldEdit::UkHours(choice(field, raw)?),
            FieldId::OfficeWork => FieldEdit::OfficeWork(choice(field, raw)?),
            FieldId::SalaryRange => FieldEdit::SalaryRange(choice(field, raw)?),
            FieldId::UkClients => FieldEdit::UkClients(choice(field, raw)?),
            FieldId::AccuracyConsent => FieldEdit::AccuracyConsent(flag(field, raw)?),
            FieldId::DataConsent => FieldEdit::DataConsent(flag(field, raw)?),
            FieldId::Skills | FieldId::Portfolio | FieldId::Cv => {
                return Err(EditError::NotDirectlyEditable { field })
            }
        };
        Ok(edit)
    }
}

fn choice<T: std::str::FromStr>(field: FieldId, raw: &str) -> Result<Option<T>, EditError> {
    parse_choice::<T>(raw).map_err(|_| EditError::UnknownChoice {
        field,
        value: raw.to_string(),
    })
}

fn flag(field: FieldId, raw: &str) -> Result<bool, EditError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" => Ok(false),
        _ => Err(EditError::InvalidFlag {
            field,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_draft_serializes_unselected_choices_as_empty_strings() {
        let json = serde_json::to_value(ApplicationDraft::default()).unwrap();
        assert_eq!(json["primaryRole"], "");
        assert_eq!(json["salaryRange"], "");
        assert_eq!(json["accuracyConsent"], false);
        assert_eq!(json["portfolio"], serde_json::json!([]));
    }

    #[test]
    fn test_draft_deserializes_camel_case_document() {
        let json = r#"{
            "fullName": "Ada Obi",
            "primaryRole": "Other",
            "customRole": "Prompt Engineer",
            "experience": "3–5",
            "ukClients": "Yes",
            "dataConsent": true
        }"#;
        let draft: ApplicationDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.full_name, "Ada Obi");
        assert!(draft.wants_custom_role());
        assert_eq!(draft.experience, Some(ExperienceBracket::ThreeToFive));
        assert!(draft.has_uk_clients());
        assert!(draft.data_consent);
        assert!(!draft.accuracy_consent);
    }

    #[test]
    fn test_unknown_choice_in_document_fails_decode() {
        let json = r#"{"officeWork": "Sometimes"}"#;
        assert!(serde_json::from_str::<ApplicationDraft>(json).is_err());
    }

    #[test]
    fn test_switching_role_keeps_custom_role() {
        let mut draft = ApplicationDraft::default();
        draft.apply(FieldEdit::PrimaryRole(Some(PrimaryRole::Other)));
        draft.apply(FieldEdit::CustomRole("Solutions Architect".into()));
        draft.apply(FieldEdit::PrimaryRole(Some(PrimaryRole::DataAnalyst)));
        draft.apply(FieldEdit::PrimaryRole(Some(PrimaryRole::Other)));
        assert_eq!(draft.custom_role, "Solutions Architect");
    }

    #[test]
    fn test_parse_edit_for_each_field_kind() {
        assert_eq!(
            FieldEdit::parse(FieldId::Email, "a@b.co").unwrap(),
            FieldEdit::Email("a@b.co".into())
        );
        assert_eq!(
            FieldEdit::parse(FieldId::OfficeWork, "Hybrid").unwrap(),
            FieldEdit::OfficeWork(Some(OfficeWork::Hybrid))
        );
        assert_eq!(
            FieldEdit::parse(FieldId::Availability, "").unwrap(),
            FieldEdit::Availability(None)
        );
        assert_eq!(
            FieldEdit::parse(FieldId::DataConsent, "Yes").unwrap(),
            FieldEdit::DataConsent(true)
        );
    }

    #[test]
    fn test_parse_edit_rejections() {
        assert!(matches!(
            FieldEdit::parse(FieldId::UkHours, "Maybe"),
            Err(EditError::UnknownChoice { field: FieldId::UkHours, .. })
        ));
        assert!(matches!(
            FieldEdit::parse(FieldId::AccuracyConsent, "sure"),
            Err(EditError::InvalidFlag { .. })
        ));
        assert_eq!(
            FieldEdit::parse(FieldId::Skills, "Rust"),
            Err(EditError::NotDirectlyEditable { field: FieldId::Skills })
        );
    }

    #[test]
    fn test_edit_reports_its_field() {
        assert_eq!(FieldEdit::Interest(String::new()).field(), FieldId::Interest);
        assert_eq!(FieldEdit::UkClients(None).field(), FieldId::UkClients);
    }
}
