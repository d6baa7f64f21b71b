//! Submission of a finished application to the intake backend.
//!
//! The transport sits behind [`SubmissionClient`] so the form controller can
//! be driven by the real HTTP client or by a recording fake in tests.

pub mod http;
pub mod payload;

use async_trait::async_trait;
use serde::Deserialize;

use crate::errors::SubmitError;

pub use http::HttpSubmissionClient;
pub use payload::{CvAttachment, SubmissionPayload};

pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to submit application";

/// Body returned by the intake endpoint for every status.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    /// Only an array counts as field errors; any other shape is ignored.
    #[serde(default)]
    pub errors: Option<serde_json::Value>,
}

impl ApiResponse {
    /// The field errors, when `errors` is an array. Entries that are not
    /// `{field, message}` objects are skipped.
    pub fn field_errors(&self) -> Option<Vec<ServerFieldError>> {
        let entries = self.errors.as_ref()?.as_array()?;
        Some(
            entries
                .iter()
                .filter_map(|entry| ServerFieldError::deserialize(entry).ok())
                .collect(),
        )
    }
}

/// A field error as reported by the server. The field name is kept as sent;
/// the controller maps it onto the local field set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerFieldError {
    pub field: String,
    pub message: String,
}

/// What the endpoint decided about an application that reached it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted { message: Option<String> },
    /// Server-side validation failed; the form stays populated.
    Rejected { errors: Vec<ServerFieldError> },
    /// Any other refusal; shown as a single form-level message.
    Failed { message: String },
}

#[async_trait]
pub trait SubmissionClient: Send + Sync {
    async fn submit(&self, payload: SubmissionPayload) -> Result<SubmitOutcome, SubmitError>;
}

/// Classifies a response. The HTTP status decides acceptance; an unreadable
/// body is a transport error whatever the status.
pub fn interpret_response(status: u16, body: &str) -> Result<SubmitOutcome, SubmitError> {
    let response: ApiResponse = serde_json::from_str(body)?;

    if (200..300).contains(&status) {
        return Ok(SubmitOutcome::Accepted {
            message: response.message,
        });
    }

    match response.field_errors() {
        Some(errors) => Ok(SubmitOutcome::Rejected { errors }),
        None => Ok(SubmitOutcome::Failed {
            message: response
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_status_is_accepted() {
        let outcome = interpret_response(
            201,
            r#"{"success":true,"message":"Application received","data":{"id":"a1"}}"#,
        )
        .unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Accepted {
                message: Some("Application received".into())
            }
        );
    }

    #[test]
    fn test_rejection_with_errors_array() {
        let body = r#"{
            "success": false,
            "message": "Validation failed",
            "errors": [
                {"field": "email", "message": "Email already used"},
                {"field": "cv", "message": "CV must be a PDF"}
            ]
        }"#;
        match interpret_response(400, body).unwrap() {
            SubmitOutcome::Rejected { errors } => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0].field, "email");
                assert_eq!(errors[1].message, "CV must be a PDF");
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_failure_without_errors_uses_server_message() {
        let outcome =
            interpret_response(500, r#"{"success":false,"message":"Upload limit reached"}"#)
                .unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Failed {
                message: "Upload limit reached".into()
            }
        );
    }

    #[test]
    fn test_failure_without_message_uses_generic_text() {
        let outcome = interpret_response(503, r#"{"success":false}"#).unwrap();
        assert_eq!(
            outcome,
            SubmitOutcome::Failed {
                message: GENERIC_FAILURE_MESSAGE.into()
            }
        );
    }

    #[test]
    fn test_non_array_errors_fall_back_to_message() {
        let body = r#"{"success":false,"message":"Invalid input","errors":{"email":"taken"}}"#;
        assert_eq!(
            interpret_response(400, body).unwrap(),
            SubmitOutcome::Failed {
                message: "Invalid input".into()
            }
        );
        assert_eq!(
            interpret_response(422, r#"{"errors":"bad"}"#).unwrap(),
            SubmitOutcome::Failed {
                message: GENERIC_FAILURE_MESSAGE.into()
            }
        );
    }

    #[test]
    fn test_malformed_error_entries_are_skipped() {
        let body = r#"{"errors":[{"field":"phone","message":"Phone is invalid"},"oops",{"field":"email"}]}"#;
        assert_eq!(
            interpret_response(400, body).unwrap(),
            SubmitOutcome::Rejected {
                errors: vec![ServerFieldError {
                    field: "phone".into(),
                    message: "Phone is invalid".into()
                }]
            }
        );
    }

    #[test]
    fn test_unreadable_body_is_a_transport_error() {
        assert!(matches!(
            interpret_response(502, "<html>Bad Gateway</html>"),
            Err(SubmitError::MalformedResponse(_))
        ));
        assert!(interpret_response(200, "").is_err());
    }
}
