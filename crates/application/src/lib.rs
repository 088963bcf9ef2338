//! Lockwallet Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (interfaces for transport, secure storage and navigation)
//! - The token store and the authenticated API client with single-flight
//!   token refresh
//! - Auth actions and wallet operations built on that client

pub mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod ports;
pub mod use_cases;
pub mod wallet_api;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth::{RefreshCoordinator, RemoteAuthService, TokenStore};
pub use client::ApiClient;
pub use error::{ApiError, ApiResult, AuthError};
pub use ports::{
    AuthService, FileSystem, FileSystemError, Navigator, SecureStorage, StorageError, StorageKey,
    Transport, TransportError,
};
pub use use_cases::{AuthState, InitializeAuth, SignIn, SignInInput, SignInOutput, SignOut};
pub use wallet_api::WalletApi;
