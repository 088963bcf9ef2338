//! In-memory session store with change notification.
//!
//! The store is the single owner of the live session. It is shared by the
//! API client and the auth actions through an `Arc`, and every change is
//! published on a watch channel so a front end can follow the signed-in
//! user without polling.

use lockwallet_domain::{AuthSnapshot, Session, TokenPair, User};
use tokio::sync::watch;

/// Thread-safe holder of the current session and user.
#[derive(Debug)]
pub struct TokenStore {
    state: watch::Sender<AuthSnapshot>,
}

impl TokenStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        let (state, _) = watch::channel(AuthSnapshot::default());
        Self { state }
    }

    /// Returns the current tokens.
    #[must_use]
    pub fn get(&self) -> Session {
        self.state.borrow().session.clone()
    }

    /// Returns the current access token.
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.state.borrow().session.access_token.clone()
    }

    /// Returns the current refresh token.
    #[must_use]
    pub fn refresh_token(&self) -> Option<String> {
        self.state.borrow().session.refresh_token.clone()
    }

    /// Replaces both tokens at once.
    pub fn set(&self, access_token: Option<String>, refresh_token: Option<String>) {
        self.state.send_modify(|snapshot| {
            snapshot.session = Session {
                access_token,
                refresh_token,
            };
        });
    }

    /// Replaces both tokens with a freshly issued pair.
    pub fn set_pair(&self, pair: TokenPair) {
        self.state.send_modify(|snapshot| {
            snapshot.session = Session::from(pair);
        });
    }

    /// Returns the signed-in user, if known.
    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    /// Replaces the signed-in user.
    pub fn set_user(&self, user: Option<User>) {
        self.state.send_modify(|snapshot| snapshot.user = user);
    }

    /// Drops the tokens and the user.
    pub fn clear(&self) {
        self.state.send_replace(AuthSnapshot::default());
    }

    /// Returns a copy of the whole state.
    #[must_use]
    pub fn snapshot(&self) -> AuthSnapshot {
        self.state.borrow().clone()
    }

    /// Returns true if an access token is held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// Subscribes to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthSnapshot> {
        self.state.subscribe()
    }
}

impl Default for TokenStore {
    fn default() -> Self {
        Self::new()
    }
}
