//! The `{status, message, data}` body shape shared by every endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Successful response body.
///
/// `status` is echoed by the server as either a word (`"success"`) or a
/// number depending on the endpoint, so it is kept untyped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    /// Server-side status marker.
    #[serde(default)]
    pub status: Value,
    /// Human readable message.
    #[serde(default)]
    pub message: Option<String>,
    /// Endpoint specific payload.
    pub data: T,
}

/// Failure response body: `{status, message, data: {error}}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorEnvelope {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<ErrorData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorData {
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorEnvelope {
    /// The message to surface: `message` first, then `data.error`.
    pub(crate) fn into_message(self) -> Option<String> {
        self.message
            .filter(|m| !m.trim().is_empty())
            .or_else(|| self.data.and_then(|d| d.error))
            .filter(|m| !m.trim().is_empty())
    }
}
