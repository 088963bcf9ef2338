//! Auth service client for the login and refresh endpoints.

use std::sync::Arc;

use async_trait::async_trait;
use lockwallet_domain::{ApiRequest, TokenPair, token_preview};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::endpoints;
use crate::error::AuthError;
use crate::ports::{AuthService, Transport};

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshBody<'a> {
    refresh_token: &'a str,
}

#[derive(Deserialize)]
struct TokensData {
    tokens: TokenPair,
}

/// `AuthService` backed by the remote API.
///
/// Stateless: it neither reads nor writes the token store. Requests go
/// straight to the transport, never through the authenticated client, so a
/// failing refresh cannot recurse into another refresh.
pub struct RemoteAuthService {
    transport: Arc<dyn Transport>,
}

impl RemoteAuthService {
    /// Creates a new auth service client on top of `transport`.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    async fn exchange(&self, request: ApiRequest) -> Result<TokenPair, AuthError> {
        let response = self
            .transport
            .send(&request, None)
            .await
            .map_err(|e| AuthError::Unreachable(e.to_string()))?;

        if !response.is_success() {
            return Err(AuthError::Rejected {
                status: response.status.as_u16(),
                message: response.error_message(),
            });
        }

        response
            .data::<TokensData>()
            .map(|data| data.tokens)
            .map_err(|e| AuthError::Malformed(e.to_string()))
    }
}

#[async_trait]
impl AuthService for RemoteAuthService {
    async fn login(&self, email: &str, password: &str) -> Result<TokenPair, AuthError> {
        debug!(email, "logging in");
        let request = ApiRequest::post(endpoints::LOGIN)
            .with_json(&LoginBody { email, password })
            .map_err(|e| AuthError::Malformed(e.to_string()))?;
        self.exchange(request).await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        debug!(refresh_token = %token_preview(refresh_token), "exchanging refresh token");
        let request = ApiRequest::post(endpoints::REFRESH_TOKEN)
            .with_json(&RefreshBody { refresh_token })
            .map_err(|e| AuthError::Malformed(e.to_string()))?;
        self.exchange(request).await
    }
}
