//! Transport port

use async_trait::async_trait;
use lockwallet_domain::{ApiRequest, ApiResponse};

/// Failures where no HTTP response was received.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum TransportError {
    /// The request URL could not be built.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The host name did not resolve.
    #[error("DNS lookup failed for {host}: {message}")]
    DnsError {
        /// Host that failed to resolve.
        host: String,
        /// Resolver message.
        message: String,
    },

    /// The server refused the connection.
    #[error("connection refused by {host}:{port}")]
    ConnectionRefused {
        /// Target host.
        host: String,
        /// Target port.
        port: u16,
    },

    /// Any other connection-level failure.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// No complete response within the configured timeout.
    #[error("request timed out after {timeout_ms} ms")]
    Timeout {
        /// Timeout that elapsed.
        timeout_ms: u64,
    },

    /// Anything else the HTTP library reported.
    #[error("{0}")]
    Other(String),
}

/// Port for sending a single request to the API.
///
/// Implementations perform exactly one network exchange: no retries, no
/// token handling beyond attaching the bearer token they are given, and
/// no interpretation of the status code.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request`, attaching `Authorization: Bearer <bearer>` when a
    /// token is given.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` only when no response was received; every
    /// HTTP status, including 4xx and 5xx, is an `Ok` response.
    async fn send(
        &self,
        request: &ApiRequest,
        bearer: Option<&str>,
    ) -> Result<ApiResponse, TransportError>;
}
