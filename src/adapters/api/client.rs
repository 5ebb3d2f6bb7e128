//! HTTP client for the patient service
//!
//! Posts a draft as JSON to the patient creation endpoint with a bearer token
//! and maps the response onto [`TransportError`].

use super::models::ServiceErrorBody;
use super::PatientTransport;
use crate::config::{ApiConfig, SecretString};
use crate::domain::{IntakeError, PatientDraft, Result, TransportError};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, ClientBuilder};
use secrecy::ExposeSecret;
use std::time::Duration;

/// `reqwest`-backed [`PatientTransport`]
///
/// # Example
///
/// ```no_run
/// use intake::adapters::api::PatientApiClient;
/// use intake::config::ApiConfig;
///
/// # fn example() -> intake::domain::Result<()> {
/// let client = PatientApiClient::new(&ApiConfig::default())?;
/// # Ok(())
/// # }
/// ```
pub struct PatientApiClient {
    /// Full URL of the patient creation endpoint
    url: String,

    /// HTTP client for making requests
    client: Client,
}

impl PatientApiClient {
    /// Create a new client from API configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut client_builder = ClientBuilder::new()
            .timeout(config.timeout())
            .connect_timeout(Duration::from_secs(10));

        if !config.tls_verify {
            tracing::warn!("TLS certificate verification disabled for patient service");
            client_builder = client_builder.danger_accept_invalid_certs(true);
        }

        let client = client_builder.build().map_err(|e| {
            IntakeError::Configuration(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            url: config.patients_url(),
            client,
        })
    }
}

#[async_trait]
impl PatientTransport for PatientApiClient {
    async fn create_patient(
        &self,
        draft: &PatientDraft,
        credential: Option<&SecretString>,
    ) -> std::result::Result<serde_json::Value, TransportError> {
        // An absent credential is forwarded as an empty bearer token
        let token = match credential {
            Some(token) => token.expose_secret().as_str(),
            None => {
                tracing::warn!(url = %self.url, "No credential available, sending empty bearer token");
                ""
            }
        };

        let request = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .json(draft);

        tracing::debug!(url = %self.url, "Posting patient draft");

        let resp = request.send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout(e.to_string())
            } else {
                TransportError::ConnectionFailed(e.to_string())
            }
        })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = ServiceErrorBody::message_from(&body);
            tracing::debug!(
                status = status.as_u16(),
                has_message = message.is_some(),
                "Patient service rejected request"
            );
            return Err(TransportError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        resp.json::<serde_json::Value>()
            .await
            .map_err(|e| TransportError::InvalidResponse(e.to_string()))
    }

    fn endpoint(&self) -> &str {
        &self.url
    }
}
