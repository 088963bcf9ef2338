//! Authentication state for the Lockwallet client.
//!
//! This module provides:
//! - The process-wide token store with change notification
//! - The single-flight refresh coordinator used by the API client
//! - The auth service client for the login and refresh endpoints

mod coordinator;
mod remote_auth_service;
mod token_store;

pub(crate) use coordinator::{PendingRequest, Ticket};
pub use coordinator::RefreshCoordinator;
pub use remote_auth_service::RemoteAuthService;
pub use token_store::TokenStore;
