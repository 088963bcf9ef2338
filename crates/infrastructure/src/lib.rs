//! Lockwallet Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus configuration and logging.

pub mod adapters;
pub mod bootstrap;
pub mod config;
pub mod logging;
pub mod persistence;
pub mod serialization;

pub use adapters::ReqwestTransport;
pub use bootstrap::{BootstrapError, build_client, file_storage};
pub use config::{ApiConfig, AppConfig, ConfigError, LogFormat, LoggingConfig, StorageConfig};
pub use logging::{LoggingError, init_logging};
pub use persistence::{FileSecureStorage, MemorySecureStorage, SESSION_FILE, TokioFileSystem};
pub use serialization::{SerializationError, from_json_bytes, to_json_stable_bytes};
