//! Auth service port

use async_trait::async_trait;
use lockwallet_domain::TokenPair;

use crate::error::AuthError;

/// Port for the credential endpoints.
///
/// Calls made through this port bypass the authenticated client: they
/// carry no bearer token and are never intercepted on 401.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchanges email and password for a token pair.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Rejected` for bad credentials and
    /// `AuthError::Unreachable` when there is no response.
    async fn login(&self, email: &str, password: &str) -> Result<TokenPair, AuthError>;

    /// Exchanges a refresh token for a new token pair.
    ///
    /// No retries happen at this layer.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Rejected` when the token is expired or revoked
    /// and `AuthError::Unreachable` when there is no response.
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError>;
}
