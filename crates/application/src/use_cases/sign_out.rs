//! Sign-out use case

use tracing::{info, warn};

use crate::client::ApiClient;

/// Forgets the session locally.
///
/// Storage failures are logged and swallowed: a broken keychain must never
/// keep the user signed in.
pub struct SignOut {
    client: ApiClient,
}

impl SignOut {
    /// Creates a new `SignOut` use case.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Clears secure storage and the token store.
    pub async fn execute(&self) {
        if let Err(e) = self.client.storage().clear_all().await {
            warn!(error = %e, "could not clear stored session");
        }
        self.client.tokens().clear();
        info!("signed out");
    }
}
