//! Lockwallet Domain - Core business types
//!
//! This crate defines the domain model for the Lockwallet client.
//! All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod finance;
pub mod id;
pub mod request;
pub mod response;
pub mod session;
pub mod user;

pub use error::{DomainError, DomainResult};
pub use finance::{
    AirtimePurchase, Amount, DataPlan, DataPurchase, Lock, LockStatus, NewLock, Outlet, Spend,
    Transaction, TransactionKind, Wallet, validate_lock_id,
};
pub use id::generate_request_id;
pub use request::{ApiRequest, HttpMethod, MAX_RETRIES};
pub use response::{ApiResponse, Envelope, StatusCode};
pub use session::{AuthSnapshot, Session, TokenPair, token_preview};
pub use user::User;
