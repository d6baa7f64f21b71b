#![allow(dead_code)]

use std::path::PathBuf;

use thiserror::Error;

use crate::models::field::FieldId;

/// Shown for any submission that never produced a readable response.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection and try again.";

/// Failures of the key-value persistence backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store file {path} is not a valid key-value document: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not replace store file: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("Storage quota exceeded while writing '{key}'")]
    QuotaExceeded { key: String },
}

/// Failures while loading or saving the persisted draft.
#[derive(Debug, Error)]
pub enum DraftError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Persisted value under '{key}' could not be decoded: {source}")]
    Decode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Draft value for '{key}' could not be encoded: {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl DraftError {
    /// True when stored data was read but could not be understood.
    pub fn is_undecodable(&self) -> bool {
        matches!(
            self,
            DraftError::Decode { .. } | DraftError::Store(StoreError::Corrupt { .. })
        )
    }
}

/// Failures of the submission transport. Every variant is shown to the user
/// as [`NETWORK_ERROR_MESSAGE`].
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Could not encode submission part: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Response body is not a valid API response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    #[error("Could not read CV file {path}: {source}")]
    Attachment {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Rejected edit requests coming from the command line or a caller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("Portfolio link index {index} is out of range ({len} slots)")]
    LinkIndexOutOfRange { index: usize, len: usize },

    #[error("'{value}' is not an option for {field}")]
    UnknownChoice { field: FieldId, value: String },

    #[error("'{value}' is not a yes/no value for {field}")]
    InvalidFlag { field: FieldId, value: String },

    #[error("{field} cannot be set directly")]
    NotDirectlyEditable { field: FieldId },
}
