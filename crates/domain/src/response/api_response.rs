//! Response type
//!
//! Contains the raw HTTP response as received by a transport, plus helpers
//! for decoding the JSON envelope the API wraps every payload in.

use std::collections::HashMap;
use std::time::Duration;

use serde::de::DeserializeOwned;

use super::envelope::{Envelope, ErrorEnvelope};
use super::status::StatusCode;

/// Longest plain-text body echoed into an error message.
const MAX_TEXT_ERROR_LEN: usize = 200;

/// HTTP response as received from the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response headers, lowercase names.
    pub headers: HashMap<String, String>,
    /// Raw body bytes.
    pub body: Vec<u8>,
    /// Time between send and full body receipt.
    pub duration: Duration,
}

impl ApiResponse {
    /// Creates a new `ApiResponse` from raw response data.
    #[must_use]
    pub fn new(
        status: impl Into<StatusCode>,
        headers: HashMap<String, String>,
        body: Vec<u8>,
        duration: Duration,
    ) -> Self {
        Self {
            status: status.into(),
            headers: headers
                .into_iter()
                .map(|(k, v)| (k.to_ascii_lowercase(), v))
                .collect(),
            body,
            duration,
        }
    }

    /// Creates a response with a JSON body and no headers; handy for fakes.
    #[must_use]
    pub fn json_body(status: u16, body: &serde_json::Value) -> Self {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        Self::new(status, headers, body.to_string().into_bytes(), Duration::ZERO)
    }

    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns true if the server rejected the credentials (401).
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        self.status.is_unauthorized()
    }

    /// Gets a header value by name (case-insensitive).
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&String> {
        self.headers.get(&name.to_ascii_lowercase())
    }

    /// Decodes the whole body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the parse error if the body is not the expected JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Decodes the `data` member of the `{status, message, data}` envelope.
    ///
    /// # Errors
    ///
    /// Returns the parse error if the body is not a well-formed envelope.
    pub fn data<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        self.json::<Envelope<T>>().map(|envelope| envelope.data)
    }

    /// Returns the message to show for a failed response.
    ///
    /// Uses the envelope's `message`, then `data.error`, then a short
    /// plain-text body, then the reason phrase.
    #[must_use]
    pub fn error_message(&self) -> String {
        if let Ok(envelope) = serde_json::from_slice::<ErrorEnvelope>(&self.body)
            && let Some(message) = envelope.into_message()
        {
            return message;
        }

        let text = String::from_utf8_lossy(&self.body);
        let text = text.trim();
        if !text.is_empty() && !text.starts_with('{') && text.len() <= MAX_TEXT_ERROR_LEN {
            return text.to_string();
        }

        self.status.reason_phrase().to_string()
    }

    /// Returns a human-readable duration string.
    #[must_use]
    pub fn duration_display(&self) -> String {
        let ms = self.duration.as_millis();
        if ms < 1000 {
            format!("{ms} ms")
        } else {
            #[allow(clippy::cast_precision_loss)]
            let secs = ms as f64 / 1000.0;
            format!("{secs:.2} s")
        }
    }
}
