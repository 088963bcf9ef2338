//! Start-up session restore with background revalidation.

use lockwallet_domain::User;
use tracing::{debug, info, warn};

use crate::client::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::use_cases::SignOut;
use crate::wallet_api::WalletApi;

/// Where the session stands after start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// Nothing was stored; the user has to sign in.
    Anonymous,
    /// The stored session is valid and the profile is current.
    Authenticated {
        /// Live profile.
        user: User,
    },
    /// The profile could not be checked for a reason unrelated to auth;
    /// the cached profile is kept.
    Stale {
        /// Cached profile, if one was stored.
        user: Option<User>,
        /// Why revalidation failed.
        error: ApiError,
    },
    /// The stored session was rejected and has been cleared.
    SignedOut {
        /// The auth failure that ended the session.
        reason: ApiError,
    },
}

impl AuthState {
    /// The user to show, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated { user } => Some(user),
            Self::Stale { user, .. } => user.as_ref(),
            Self::Anonymous | Self::SignedOut { .. } => None,
        }
    }
}

/// Restores the stored session, then checks it against the server.
///
/// `restore` is fast and offline so the cached user can be shown at once;
/// `revalidate` does the network round trip, going through the client's
/// 401 handling, so an expired access token costs one refresh attempt.
pub struct InitializeAuth {
    client: ApiClient,
}

impl InitializeAuth {
    /// Creates a new `InitializeAuth` use case.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Loads tokens and the cached user from secure storage into the token
    /// store.
    ///
    /// Returns false when no session is stored. An unreadable cached
    /// profile is dropped rather than failing the restore.
    ///
    /// # Errors
    /// Returns `ApiError::Storage` if the tokens cannot be read.
    pub async fn restore(&self) -> ApiResult<bool> {
        let storage = self.client.storage();
        let session = storage.load_session().await?;
        if session.is_empty() {
            debug!("no stored session");
            return Ok(false);
        }

        let user = storage.load_user().await.unwrap_or_else(|e| {
            warn!(error = %e, "discarding unreadable cached profile");
            None
        });

        let tokens = self.client.tokens();
        tokens.set(session.access_token, session.refresh_token);
        debug!(cached_user = user.is_some(), "session restored");
        tokens.set_user(user);
        Ok(true)
    }

    /// Fetches the live profile and settles the session.
    pub async fn revalidate(&self) -> AuthState {
        let cached = self.client.tokens().user();
        match WalletApi::new(self.client.clone()).profile().await {
            Ok(user) => {
                if let Err(e) = self.client.storage().save_user(&user).await {
                    warn!(error = %e, "could not cache user profile");
                }
                self.client.tokens().set_user(Some(user.clone()));
                info!(user_id = %user.id, "session revalidated");
                AuthState::Authenticated { user }
            }
            Err(error) if error.is_auth_failure() => {
                info!(error = %error, "stored session rejected");
                SignOut::new(self.client.clone()).execute().await;
                AuthState::SignedOut { reason: error }
            }
            Err(error) => {
                warn!(error = %error, "could not revalidate session, keeping cached profile");
                AuthState::Stale {
                    user: cached,
                    error,
                }
            }
        }
    }

    /// Runs `restore` then `revalidate`.
    ///
    /// # Errors
    /// Returns `ApiError::Storage` if the stored session cannot be read.
    pub async fn execute(&self) -> ApiResult<AuthState> {
        if self.restore().await? {
            Ok(self.revalidate().await)
        } else {
            Ok(AuthState::Anonymous)
        }
    }
}
