//! Outgoing API request descriptor.

use serde::Serialize;
use serde_json::Value;

use crate::error::{DomainError, DomainResult};
use crate::id::generate_request_id;
use crate::request::HttpMethod;

/// How many times a request may be re-sent after a token refresh.
pub const MAX_RETRIES: u8 = 1;

/// A request against the remote API, relative to the configured base URL.
///
/// The descriptor is transport-agnostic: the authenticated client adds the
/// `Authorization` header at dispatch time, so a request can be replayed
/// with a different token without being rebuilt.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// Correlation id used in logs.
    pub id: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// Path relative to the base URL, e.g. `/api/v1/wallet`.
    pub path: String,
    /// Query parameters, in insertion order.
    pub query: Vec<(String, String)>,
    /// Extra headers. `Authorization` is managed by the client.
    pub headers: Vec<(String, String)>,
    /// JSON body, if any.
    pub body: Option<Value>,
    /// Number of times this request has been re-sent after a refresh.
    pub attempt: u8,
}

impl ApiRequest {
    /// Creates a request with no query, headers or body.
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            id: generate_request_id(),
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
            attempt: 0,
        }
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// Creates a POST request.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets a JSON body from any serializable value.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBody` if the value cannot be encoded.
    pub fn with_json<T: Serialize>(mut self, body: &T) -> DomainResult<Self> {
        let value =
            serde_json::to_value(body).map_err(|e| DomainError::InvalidBody(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }

    /// Returns true if the request may still be re-sent after a refresh.
    #[must_use]
    pub const fn can_retry(&self) -> bool {
        self.attempt < MAX_RETRIES
    }

    /// Returns the same request marked as re-sent once more.
    #[must_use]
    pub fn into_retry(mut self) -> Self {
        self.attempt = self.attempt.saturating_add(1);
        self
    }
}
