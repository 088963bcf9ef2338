//! Session and token types.

use serde::{Deserialize, Serialize};

use crate::user::User;

/// The bearer credentials of the signed-in user.
///
/// Both tokens are opaque strings. A session is replaced wholesale on
/// every refresh and cleared entirely on sign-out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Token attached to outgoing requests.
    pub access_token: Option<String>,
    /// Token exchanged for a new pair when the access token expires.
    pub refresh_token: Option<String>,
}

impl Session {
    /// Creates a session holding both tokens.
    #[must_use]
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: Some(access_token.into()),
            refresh_token: Some(refresh_token.into()),
        }
    }

    /// Returns true if neither token is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none()
    }

    /// Returns the `Authorization` header value, if an access token is held.
    #[must_use]
    pub fn authorization_header(&self) -> Option<String> {
        self.access_token
            .as_deref()
            .map(|token| format!("Bearer {token}"))
    }
}

impl From<TokenPair> for Session {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: Some(pair.access_token),
            refresh_token: Some(pair.refresh_token),
        }
    }
}

/// A fresh access/refresh token pair as issued by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// The new access token.
    pub access_token: String,
    /// The new (possibly rotated) refresh token.
    pub refresh_token: String,
}

impl TokenPair {
    /// Creates a new token pair.
    #[must_use]
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

/// Point-in-time view of the authentication state, published to observers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthSnapshot {
    /// Current tokens.
    pub session: Session,
    /// Profile of the signed-in user, possibly restored from cache.
    pub user: Option<User>,
}

impl AuthSnapshot {
    /// Returns true if an access token is held.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.session.access_token.is_some()
    }
}

/// Get a preview of a token (first 8 chars + ...), safe for logs.
#[must_use]
pub fn token_preview(token: &str) -> String {
    if token.chars().count() > 12 {
        let head: String = token.chars().take(8).collect();
        format!("{head}...")
    } else {
        "***".to_string()
    }
}
