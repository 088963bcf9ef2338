//! File-backed secure storage.
//!
//! The session lives in a single `session.json` in the storage directory:
//! ```json
//! {
//!   "access_token": "eyJ...",
//!   "refresh_token": "eyJ...",
//!   "user": "{\"id\":\"u1\",...}"
//! }
//! ```
//! The file is written owner-only and replaced atomically (write to a
//! temporary file, then rename), so a crash mid-write never leaves a
//! truncated session behind. A file that does not parse is treated as no
//! session and overwritten by the next write.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use lockwallet_application::ports::{FileSystem, FileSystemError, SecureStorage, StorageError, StorageKey};
use tokio::sync::Mutex;
use tracing::warn;

use crate::serialization::{from_json_bytes, to_json_stable_bytes};

/// Name of the session file inside the storage directory.
pub const SESSION_FILE: &str = "session.json";

type Entries = BTreeMap<String, String>;

/// Converts `FileSystemError` to `std::io::Error` for `StorageError`.
fn to_io_error(e: FileSystemError) -> std::io::Error {
    match e {
        FileSystemError::Io(io_err) => io_err,
        FileSystemError::NotFound(path) => {
            std::io::Error::new(std::io::ErrorKind::NotFound, path.display().to_string())
        }
        FileSystemError::PermissionDenied(path) => std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            path.display().to_string(),
        ),
    }
}

/// Secure storage in an owner-only JSON file.
#[derive(Debug)]
pub struct FileSecureStorage<F> {
    fs: F,
    dir: PathBuf,
    // Serializes read-modify-write cycles on the file.
    write_lock: Mutex<()>,
}

impl<F: FileSystem> FileSecureStorage<F> {
    /// Creates a storage rooted at `dir`. Nothing is touched on disk until
    /// the first write.
    pub fn new(fs: F, dir: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the session file.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        self.dir.join(SESSION_FILE)
    }

    async fn read_entries(&self, path: &Path) -> Result<Entries, StorageError> {
        match self.fs.read_file(path).await {
            Ok(bytes) => Ok(from_json_bytes(&bytes).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "ignoring unreadable session file");
                Entries::new()
            })),
            Err(FileSystemError::NotFound(_)) => Ok(Entries::new()),
            Err(e) => Err(StorageError::Io(to_io_error(e))),
        }
    }

    async fn write_entries(&self, path: &Path, entries: &Entries) -> Result<(), StorageError> {
        if entries.is_empty() {
            if self.fs.exists(path).await {
                self.fs
                    .remove_file(path)
                    .await
                    .map_err(|e| StorageError::Io(to_io_error(e)))?;
            }
            return Ok(());
        }

        self.fs
            .create_dir_all(&self.dir)
            .await
            .map_err(|e| StorageError::Io(to_io_error(e)))?;

        let content =
            to_json_stable_bytes(entries).map_err(|e| StorageError::Serialization(e.to_string()))?;
        let staging = path.with_extension("json.tmp");
        self.fs
            .write_file(&staging, &content)
            .await
            .map_err(|e| StorageError::Io(to_io_error(e)))?;
        self.fs
            .rename(&staging, path)
            .await
            .map_err(|e| StorageError::Io(to_io_error(e)))
    }

    async fn update(&self, apply: impl FnOnce(&mut Entries) + Send) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let path = self.path();
        let mut entries = self.read_entries(&path).await?;
        apply(&mut entries);
        self.write_entries(&path, &entries).await
    }
}

#[async_trait]
impl<F: FileSystem> SecureStorage for FileSecureStorage<F> {
    async fn get(&self, key: StorageKey) -> Result<Option<String>, StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_entries(&self.path()).await?;
        Ok(entries.remove(key.as_str()))
    }

    async fn set(&self, key: StorageKey, value: &str) -> Result<(), StorageError> {
        let value = value.to_string();
        self.update(move |entries| {
            entries.insert(key.as_str().to_string(), value);
        })
        .await
    }

    async fn remove(&self, key: StorageKey) -> Result<(), StorageError> {
        self.update(move |entries| {
            entries.remove(key.as_str());
        })
        .await
    }
}
