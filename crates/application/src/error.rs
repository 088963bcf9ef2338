//! Application error types

use lockwallet_domain::{ApiResponse, DomainError, StatusCode};
use thiserror::Error;

use crate::ports::{StorageError, TransportError};

/// Errors surfaced to callers of the API client and auth actions.
///
/// Every variant is cheap to clone so one refresh failure can be handed to
/// every request that was waiting on it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// No response was received (connection, DNS, timeout, bad URL).
    #[error("network unreachable: {message}")]
    NetworkUnreachable {
        /// Transport failure description.
        message: String,
    },

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Message from the response envelope.
        message: String,
    },

    /// A 401 that a token refresh did not resolve.
    #[error("session expired: {message}")]
    AuthExpired {
        /// Message from the final 401 response.
        message: String,
    },

    /// The refresh endpoint rejected the refresh token or was unreachable.
    #[error("token refresh failed: {reason}")]
    RefreshFailed {
        /// Why the refresh failed.
        reason: String,
    },

    /// A 2xx response did not have the expected shape.
    #[error("unexpected response: {message}")]
    Decode {
        /// Parse error description.
        message: String,
    },

    /// Secure storage could not be read or written.
    #[error("storage error: {message}")]
    Storage {
        /// Storage failure description.
        message: String,
    },

    /// Input was rejected before anything was sent.
    #[error(transparent)]
    Validation(#[from] DomainError),
}

impl ApiError {
    /// Builds the error for a non-2xx response.
    #[must_use]
    pub fn from_response(response: &ApiResponse) -> Self {
        Self::Http {
            status: response.status.as_u16(),
            message: response.error_message(),
        }
    }

    /// HTTP status attached to this error, if the server responded.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::AuthExpired { .. } => Some(StatusCode::UNAUTHORIZED.as_u16()),
            _ => None,
        }
    }

    /// Returns true for a raw 401 that has not been through a refresh yet.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Http { status: 401, .. })
    }

    /// Returns true if the session can no longer be used.
    #[must_use]
    pub const fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Self::AuthExpired { .. } | Self::RefreshFailed { .. } | Self::Http { status: 401, .. }
        )
    }

    /// Turns a 401 on an already-retried request into `AuthExpired`.
    #[must_use]
    pub fn into_terminal(self) -> Self {
        match self {
            Self::Http {
                status: 401,
                message,
            } => Self::AuthExpired { message },
            other => other,
        }
    }

    /// Wraps a JSON decoding failure.
    #[must_use]
    pub fn decode(error: &serde_json::Error) -> Self {
        Self::Decode {
            message: error.to_string(),
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(error: TransportError) -> Self {
        Self::NetworkUnreachable {
            message: error.to_string(),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(error: StorageError) -> Self {
        Self::Storage {
            message: error.to_string(),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::Rejected { status, message } => Self::Http { status, message },
            AuthError::Unreachable(message) => Self::NetworkUnreachable { message },
            AuthError::Malformed(message) => Self::Decode { message },
            AuthError::MissingRefreshToken => Self::RefreshFailed {
                reason: AuthError::MissingRefreshToken.to_string(),
            },
        }
    }
}

/// Result type alias for client operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors from the auth endpoints (login, refresh).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// The server refused the credentials or the refresh token.
    #[error("{message} (HTTP {status})")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Message from the response envelope.
        message: String,
    },

    /// The auth endpoint could not be reached.
    #[error("auth service unreachable: {0}")]
    Unreachable(String),

    /// The auth endpoint answered 2xx without a token pair.
    #[error("malformed token response: {0}")]
    Malformed(String),

    /// There is no refresh token to exchange.
    #[error("no refresh token available")]
    MissingRefreshToken,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_from_response_carries_status_and_message() {
        let response =
            ApiResponse::json_body(422, &json!({"status": "error", "message": "Amount too low"}));
        let error = ApiError::from_response(&response);
        assert_eq!(error.status(), Some(422));
        assert_eq!(error.to_string(), "Amount too low");
        assert!(!error.is_unauthorized());
    }

    #[test]
    fn test_into_terminal_only_touches_401() {
        let unauthorized = ApiError::Http {
            status: 401,
            message: "jwt expired".to_string(),
        };
        assert!(unauthorized.is_unauthorized());
        let terminal = unauthorized.into_terminal();
        assert_eq!(
            terminal,
            ApiError::AuthExpired {
                message: "jwt expired".to_string()
            }
        );
        assert_eq!(terminal.status(), Some(401));
        assert!(terminal.is_auth_failure());

        let not_found = ApiError::Http {
            status: 404,
            message: "nope".to_string(),
        };
        assert_eq!(not_found.clone().into_terminal(), not_found);
    }

    #[test]
    fn test_network_errors_have_no_status() {
        let error = ApiError::from(TransportError::Timeout { timeout_ms: 500 });
        assert_eq!(error.status(), None);
        assert!(matches!(error, ApiError::NetworkUnreachable { .. }));
    }

    #[test]
    fn test_auth_error_mapping() {
        let rejected = ApiError::from(AuthError::Rejected {
            status: 400,
            message: "Invalid credentials".to_string(),
        });
        assert_eq!(rejected.status(), Some(400));
        assert_eq!(rejected.to_string(), "Invalid credentials");

        let missing = ApiError::from(AuthError::MissingRefreshToken);
        assert!(matches!(missing, ApiError::RefreshFailed { .. }));
    }
}
