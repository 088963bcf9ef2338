//! Wires the adapters into a ready-to-use client.

use std::sync::Arc;

use lockwallet_application::ports::{Navigator, SecureStorage, TransportError};
use lockwallet_application::{ApiClient, RemoteAuthService, TokenStore};
use tracing::debug;

use crate::adapters::ReqwestTransport;
use crate::config::{AppConfig, ConfigError};
use crate::persistence::{FileSecureStorage, TokioFileSystem};

/// Errors raised while assembling the client.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    /// The configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP client could not be built.
    #[error("failed to create HTTP client: {0}")]
    Transport(#[from] TransportError),
}

/// Opens the file-backed secure storage in the configured directory.
///
/// # Errors
/// Returns an error if no storage directory can be resolved.
pub fn file_storage(config: &AppConfig) -> Result<Arc<dyn SecureStorage>, ConfigError> {
    let dir = config.storage.resolve_dir()?;
    debug!(dir = %dir.display(), "using file storage");
    Ok(Arc::new(FileSecureStorage::new(TokioFileSystem::new(), dir)))
}

/// Builds an `ApiClient` over reqwest with a fresh token store.
///
/// The login/refresh service shares the transport but never goes through
/// the client's 401 handling.
///
/// # Errors
/// Returns an error if the base URL is invalid or the HTTP client cannot be built.
pub fn build_client(
    config: &AppConfig,
    storage: Arc<dyn SecureStorage>,
    navigator: Arc<dyn Navigator>,
) -> Result<ApiClient, BootstrapError> {
    let base_url = config.api.base_url()?;
    debug!(base_url = %base_url, timeout_ms = config.api.timeout_ms, "building API client");
    let transport = Arc::new(ReqwestTransport::new(
        base_url,
        config.api.timeout(),
        &config.api.user_agent,
    )?);
    let auth = Arc::new(RemoteAuthService::new(transport.clone()));

    Ok(ApiClient::new(
        transport,
        auth,
        Arc::new(TokenStore::new()),
        storage,
        navigator,
    ))
}
