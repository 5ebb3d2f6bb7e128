//! Patient service wire models

use serde::Deserialize;

/// Error body returned by the patient service on non-2xx responses
///
/// Services report the reason under `message` or `error`; both are optional.
#[derive(Debug, Default, Deserialize)]
pub struct ServiceErrorBody {
    #[serde(default)]
    pub message: Option<String>,

    #[serde(default)]
    pub error: Option<String>,
}

impl ServiceErrorBody {
    /// Extracts a non-empty message from a raw response body
    ///
    /// Returns `None` when the body is not a JSON object or carries no message.
    pub fn message_from(body: &str) -> Option<String> {
        let parsed: ServiceErrorBody = serde_json::from_str(body).ok()?;
        parsed
            .message
            .or(parsed.error)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
    }
}
