//! Process-local secure storage, for `--ephemeral` sessions and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use lockwallet_application::ports::{SecureStorage, StorageError, StorageKey};
use parking_lot::Mutex;

/// Secure storage that forgets everything when the process exits.
#[derive(Debug, Default)]
pub struct MemorySecureStorage {
    entries: Mutex<HashMap<StorageKey, String>>,
}

impl MemorySecureStorage {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SecureStorage for MemorySecureStorage {
    async fn get(&self, key: StorageKey) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().get(&key).cloned())
    }

    async fn set(&self, key: StorageKey, value: &str) -> Result<(), StorageError> {
        self.entries.lock().insert(key, value.to_string());
        Ok(())
    }

    async fn remove(&self, key: StorageKey) -> Result<(), StorageError> {
        self.entries.lock().remove(&key);
        Ok(())
    }
}
