//! Fixed option lists offered by the application form.
//!
//! Every choice keeps the exact string the intake backend expects, so the
//! `strum` string form doubles as the persisted and submitted value.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serializer};
use strum::{AsRefStr, Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter, AsRefStr)]
pub enum PrimaryRole {
    #[strum(to_string = "UI/UX Designer")]
    UiUxDesigner,
    #[strum(to_string = "Front-End Developer")]
    FrontEndDeveloper,
    #[strum(to_string = "Back-End Developer")]
    BackEndDeveloper,
    #[strum(to_string = "Full-Stack Developer")]
    FullStackDeveloper,
    #[strum(to_string = "Mobile App Developer (Flutter)")]
    MobileFlutter,
    #[strum(to_string = "Mobile App Developer (React Native)")]
    MobileReactNative,
    #[strum(to_string = "Mobile App Developer (iOS)")]
    MobileIos,
    #[strum(to_string = "Mobile App Developer (Android)")]
    MobileAndroid,
    #[strum(to_string = "DevOps Engineer")]
    DevOpsEngineer,
    #[strum(to_string = "SEO Specialist")]
    SeoSpecialist,
    #[strum(to_string = "Product Manager")]
    ProductManager,
    #[strum(to_string = "Digital Marketer")]
    DigitalMarketer,
    #[strum(to_string = "Content Writer")]
    ContentWriter,
    #[strum(to_string = "Data Analyst")]
    DataAnalyst,
    #[strum(to_string = "Data Scientist")]
    DataScientist,
    #[strum(to_string = "QA / Test Engineer")]
    QaTestEngineer,
    #[strum(to_string = "Game Developer")]
    GameDeveloper,
    #[strum(to_string = "Blockchain Developer")]
    BlockchainDeveloper,
    /// Free-text role; `customRole` becomes required.
    #[strum(to_string = "Other")]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter, AsRefStr)]
pub enum ExperienceBracket {
    #[strum(to_string = "0–1")]
    UpToOne,
    #[strum(to_string = "1–3")]
    OneToThree,
    #[strum(to_string = "3–5")]
    ThreeToFive,
    #[strum(to_string = "5+")]
    FivePlus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter, AsRefStr)]
pub enum Availability {
    #[strum(to_string = "Immediate")]
    Immediate,
    #[strum(to_string = "2 weeks")]
    TwoWeeks,
    #[strum(to_string = "1 month")]
    OneMonth,
    #[strum(to_string = "Other")]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter, AsRefStr)]
pub enum UkHours {
    Yes,
    Partially,
    No,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter, AsRefStr)]
pub enum OfficeWork {
    Yes,
    No,
    Hybrid,
}

/// Monthly salary expectation in Naira.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter, AsRefStr)]
pub enum SalaryRange {
    #[strum(to_string = "Below ₦400,000")]
    Below400k,
    #[strum(to_string = "₦400,000 – ₦600,000")]
    From400kTo600k,
    #[strum(to_string = "₦600,000 – ₦900,000")]
    From600kTo900k,
    #[strum(to_string = "₦900,000 – ₦1,500,000")]
    From900kTo1500k,
    #[strum(to_string = "₦1,500,000+")]
    Above1500k,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter, AsRefStr)]
pub enum UkClients {
    Yes,
    No,
}

/// Serde adapter for `Option<Choice>` fields: an unselected choice is stored
/// as the empty string, a selected one as its display string.
pub mod blank_choice {
    use super::*;

    pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: fmt::Display,
        S: Serializer,
    {
        match value {
            Some(choice) => serializer.collect_str(choice),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: FromStr,
        T::Err: fmt::Display,
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse::<T>()
            .map(Some)
            .map_err(|e| de::Error::custom(format!("unknown choice '{raw}': {e}")))
    }
}

/// Parses a user-supplied choice; the empty string deselects.
pub fn parse_choice<T>(raw: &str) -> Result<Option<T>, T::Err>
where
    T: FromStr,
{
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<T>().map(Some)
}
