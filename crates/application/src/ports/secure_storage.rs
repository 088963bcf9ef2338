//! Secure storage port
//!
//! Defines the interface for persisting the session across restarts.

use async_trait::async_trait;
use lockwallet_domain::{Session, TokenPair, User};

/// Errors that can occur during secure storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The platform store refused the operation.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// The three independently stored entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StorageKey {
    /// Current access token.
    AccessToken,
    /// Current refresh token.
    RefreshToken,
    /// Last fetched user profile, as JSON.
    User,
}

impl StorageKey {
    /// All keys, in the order they are cleared.
    pub const ALL: [Self; 3] = [Self::AccessToken, Self::RefreshToken, Self::User];

    /// Stable name of the entry.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AccessToken => "access_token",
            Self::RefreshToken => "refresh_token",
            Self::User => "user",
        }
    }
}

/// Scoped key-value store for tokens and the cached user.
#[async_trait]
pub trait SecureStorage: Send + Sync {
    /// Reads an entry.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be read.
    async fn get(&self, key: StorageKey) -> Result<Option<String>, StorageError>;

    /// Writes an entry.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be written.
    async fn set(&self, key: StorageKey, value: &str) -> Result<(), StorageError>;

    /// Deletes an entry. Deleting a missing entry is not an error.
    ///
    /// # Errors
    /// Returns an error if the backing store cannot be written.
    async fn remove(&self, key: StorageKey) -> Result<(), StorageError>;

    /// Persists both tokens of a pair.
    ///
    /// # Errors
    /// Returns the first write error.
    async fn save_tokens(&self, pair: &TokenPair) -> Result<(), StorageError> {
        self.set(StorageKey::AccessToken, &pair.access_token).await?;
        self.set(StorageKey::RefreshToken, &pair.refresh_token).await
    }

    /// Reads whatever tokens are stored.
    ///
    /// # Errors
    /// Returns the first read error.
    async fn load_session(&self) -> Result<Session, StorageError> {
        Ok(Session {
            access_token: self.get(StorageKey::AccessToken).await?,
            refresh_token: self.get(StorageKey::RefreshToken).await?,
        })
    }

    /// Caches the user profile.
    ///
    /// # Errors
    /// Returns an error if the profile cannot be encoded or written.
    async fn save_user(&self, user: &User) -> Result<(), StorageError> {
        let json =
            serde_json::to_string(user).map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.set(StorageKey::User, &json).await
    }

    /// Reads the cached user profile.
    ///
    /// # Errors
    /// Returns an error if the entry cannot be read or is not a profile.
    async fn load_user(&self) -> Result<Option<User>, StorageError> {
        match self.get(StorageKey::User).await? {
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| StorageError::Serialization(e.to_string())),
            None => Ok(None),
        }
    }

    /// Removes every entry, attempting all of them even if one fails.
    ///
    /// # Errors
    /// Returns the first error encountered.
    async fn clear_all(&self) -> Result<(), StorageError> {
        let mut first_error = None;
        for key in StorageKey::ALL {
            if let Err(e) = self.remove(key).await {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}
