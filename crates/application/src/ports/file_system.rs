//! File access port used by the file-backed session store.

use std::future::Future;
use std::path::{Path, PathBuf};

/// Failure of a file operation.
#[derive(Debug, thiserror::Error)]
pub enum FileSystemError {
    /// The path does not exist.
    #[error("not found: {0}")]
    NotFound(PathBuf),

    /// The process may not access the path.
    #[error("access denied: {0}")]
    PermissionDenied(PathBuf),

    /// Any other I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// The handful of file operations the session store needs.
///
/// `write_file` creates files readable by the owner only, since the
/// session file holds live credentials.
pub trait FileSystem: Send + Sync {
    /// Reads a whole file.
    ///
    /// # Errors
    /// `FileSystemError::NotFound` when the file is missing.
    fn read_file(&self, path: &Path)
    -> impl Future<Output = Result<Vec<u8>, FileSystemError>> + Send;

    /// Creates or truncates an owner-only file and writes `contents` to it.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or written.
    fn write_file(
        &self,
        path: &Path,
        contents: &[u8],
    ) -> impl Future<Output = Result<(), FileSystemError>> + Send;

    /// Creates `path` and any missing parents.
    ///
    /// # Errors
    /// Returns an error if a directory cannot be created.
    fn create_dir_all(&self, path: &Path)
    -> impl Future<Output = Result<(), FileSystemError>> + Send;

    /// Whether anything exists at `path`.
    fn exists(&self, path: &Path) -> impl Future<Output = bool> + Send;

    /// Deletes a file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be deleted.
    fn remove_file(&self, path: &Path) -> impl Future<Output = Result<(), FileSystemError>> + Send;

    /// Moves `from` to `to`, replacing `to` if it exists.
    ///
    /// # Errors
    /// Returns an error if the move fails.
    fn rename(
        &self,
        from: &Path,
        to: &Path,
    ) -> impl Future<Output = Result<(), FileSystemError>> + Send;
}
