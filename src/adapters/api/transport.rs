//! Patient transport trait definition
//!
//! The submission controller only depends on this trait, so tests and other
//! frontends can replace the HTTP client.

use crate::config::SecretString;
use crate::domain::{PatientDraft, TransportError};
use async_trait::async_trait;

/// Sends a draft to the remote patient service
///
/// # Example
///
/// ```no_run
/// use intake::adapters::api::{PatientApiClient, PatientTransport};
/// use intake::config::ApiConfig;
/// use intake::domain::PatientDraft;
///
/// # async fn example() -> intake::domain::Result<()> {
/// let client = PatientApiClient::new(&ApiConfig::default())?;
/// let response = client.create_patient(&PatientDraft::new(), None).await?;
/// println!("{response}");
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait PatientTransport: Send + Sync {
    /// Create a patient from a draft snapshot
    ///
    /// A missing credential is forwarded as-is; the service is expected to
    /// reject unauthenticated requests.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] for connection failures, timeouts,
    /// non-2xx responses and 2xx responses whose body is not JSON.
    async fn create_patient(
        &self,
        draft: &PatientDraft,
        credential: Option<&SecretString>,
    ) -> Result<serde_json::Value, TransportError>;

    /// Endpoint the transport posts to, for logging
    fn endpoint(&self) -> &str;
}
