//! Session persistence adapters.

mod file_secure_storage;
mod file_system;
mod memory_storage;

pub use file_secure_storage::{FileSecureStorage, SESSION_FILE};
pub use file_system::TokioFileSystem;
pub use memory_storage::MemorySecureStorage;
