//! Sign-in use case

use lockwallet_domain::{DomainError, User};
use tracing::{info, warn};

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::use_cases::SignOut;
use crate::wallet_api::WalletApi;

/// Credentials entered by the user.
#[derive(Debug, Clone)]
pub struct SignInInput {
    /// Login email.
    pub email: String,
    /// Plain-text password; only ever sent to the login endpoint.
    pub password: String,
}

/// Result of a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInOutput {
    /// Profile of the signed-in user.
    pub user: User,
}

/// Exchanges credentials for a session and loads the user's profile.
pub struct SignIn {
    client: ApiClient,
}

impl SignIn {
    /// Creates a new `SignIn` use case.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Executes the use case.
    ///
    /// Tokens are persisted and published before the profile is fetched, so
    /// the profile request is authenticated. If the profile cannot be loaded
    /// the half-established session is discarded.
    ///
    /// # Errors
    /// Returns the login, storage or profile error. Nothing is left signed
    /// in when an error is returned.
    pub async fn execute(&self, input: SignInInput) -> ApiResult<SignInOutput> {
        if input.email.trim().is_empty() {
            return Err(DomainError::MissingField("email").into());
        }
        if input.password.is_empty() {
            return Err(DomainError::MissingField("password").into());
        }

        let pair = self
            .client
            .auth_service()
            .login(input.email.trim(), &input.password)
            .await?;
        self.client.storage().save_tokens(&pair).await?;
        self.client.tokens().set_pair(pair);

        let user = match WalletApi::new(self.client.clone()).profile().await {
            Ok(user) => user,
            Err(error) => {
                warn!(error = %error, "profile fetch failed after login");
                SignOut::new(self.client.clone()).execute().await;
                return Err(error);
            }
        };

        if let Err(e) = self.client.storage().save_user(&user).await {
            warn!(error = %e, "could not cache user profile");
        }
        self.client.tokens().set_user(Some(user.clone()));
        info!(user_id = %user.id, "signed in");

        Ok(SignInOutput { user })
    }
}
