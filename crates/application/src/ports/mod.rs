//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod auth_service;
mod file_system;
mod navigator;
mod secure_storage;
mod transport;

pub use auth_service::AuthService;
pub use file_system::{FileSystem, FileSystemError};
pub use navigator::Navigator;
pub use secure_storage::{SecureStorage, StorageError, StorageKey};
pub use transport::{Transport, TransportError};
