use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::errors::SubmitError;

use super::{interpret_response, SubmissionClient, SubmissionPayload, SubmitOutcome};

/// Posts applications as multipart form data to the intake endpoint.
///
/// There is no retry: a second POST could file the same application twice.
#[derive(Clone)]
pub struct HttpSubmissionClient {
    client: Client,
    endpoint: String,
}

impl HttpSubmissionClient {
    /// `timeout` of `None` waits for the server indefinitely.
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self, SubmitError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SubmissionClient for HttpSubmissionClient {
    async fn submit(&self, payload: SubmissionPayload) -> Result<SubmitOutcome, SubmitError> {
        let has_cv = payload.cv().is_some();
        let form = payload.into_multipart()?;

        info!("Submitting application to {} (cv attached: {has_cv})", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!("Intake endpoint answered {status}: {} bytes", body.len());

        let outcome = interpret_response(status.as_u16(), &body);
        if let Err(e) = &outcome {
            warn!("Intake endpoint returned {status} with unreadable body: {e}");
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_keeps_endpoint() {
        let client = HttpSubmissionClient::new(
            "http://localhost:5000/api/applications/submit",
            Some(Duration::from_secs(30)),
        )
        .unwrap();
        assert_eq!(
            client.endpoint(),
            "http://localhost:5000/api/applications/submit"
        );
    }

    #[tokio::test]
    async fn test_invalid_endpoint_is_a_transport_error() {
        // The URL is rejected while building the request; nothing is sent.
        let client = HttpSubmissionClient::new("not a url", Some(Duration::from_secs(5))).unwrap();
        let payload = SubmissionPayload::build(
            &crate::validation::tests::valid_draft(),
            &crate::validation::tests::valid_skills(),
            &crate::editing::PortfolioLinks::new(),
            None,
        )
        .unwrap();
        assert!(matches!(
            client.submit(payload).await,
            Err(SubmitError::Http(_))
        ));
    }
}
