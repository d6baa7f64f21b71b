use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Closed set of form fields an error can be attached to.
///
/// The string form is the camelCase name the intake backend uses in its
/// `errors[].field` entries and in the multipart payload.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum FieldId {
    FullName,
    Email,
    Phone,
    Location,
    PrimaryRole,
    CustomRole,
    Experience,
    Skills,
    Portfolio,
    Availability,
    UkHours,
    OfficeWork,
    SalaryRange,
    Summary,
    UkClients,
    UkClientsDetails,
    Interest,
    AccuracyConsent,
    DataConsent,
    /// Only ever reported by the server, about the uploaded CV.
    Cv,
}
