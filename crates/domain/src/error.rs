//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A request body could not be encoded as JSON.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// A monetary amount is zero, negative or otherwise unusable.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// A required field was left empty.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// A phone number does not look like one.
    #[error("invalid phone number: {0}")]
    InvalidPhoneNumber(String),

    /// Spending would exceed what is left on a lock.
    #[error("insufficient funds on lock {lock_id}: requested {requested}, available {available}")]
    InsufficientLockFunds {
        /// The lock being spent from.
        lock_id: String,
        /// Amount requested, in minor units.
        requested: i64,
        /// Amount still available, in minor units.
        available: i64,
    },

    /// An id that cannot be used as a URL path segment.
    #[error("invalid id: {0:?}")]
    InvalidId(String),

    /// The lock cannot be spent from in its current state.
    #[error("lock {0} is not active")]
    LockInactive(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
