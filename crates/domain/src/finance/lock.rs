//! Budget locks: funds reserved against a spending category.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Amount;
use crate::error::{DomainError, DomainResult};

/// Lifecycle of a lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LockStatus {
    /// Funds can be spent.
    #[default]
    Active,
    /// Everything has been spent.
    Exhausted,
    /// Past its expiry date.
    Expired,
    /// Released by the user.
    Cancelled,
}

impl LockStatus {
    /// Wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Exhausted => "exhausted",
            Self::Expired => "expired",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for LockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A budget lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lock {
    /// Server-side identifier.
    pub id: String,
    /// User supplied label.
    #[serde(default)]
    pub title: Option<String>,
    /// Spending category, e.g. `food` or `transport`.
    pub category: String,
    /// Amount reserved.
    pub amount: Amount,
    /// Amount already spent.
    #[serde(default)]
    pub spent: Amount,
    /// Current status.
    #[serde(default)]
    pub status: LockStatus,
    /// When the lock was created.
    pub created_at: DateTime<Utc>,
    /// When the lock stops accepting spends.
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Lock {
    /// Funds left to spend.
    #[must_use]
    pub const fn remaining(&self) -> Amount {
        self.amount.saturating_sub(self.spent)
    }

    /// Checks a spend against this lock before it is sent.
    ///
    /// # Errors
    ///
    /// Fails if the lock is not active, the amount is not positive, or the
    /// amount exceeds what remains.
    pub fn can_spend(&self, amount: Amount) -> DomainResult<()> {
        if self.status != LockStatus::Active {
            return Err(DomainError::LockInactive(self.id.clone()));
        }
        amount.ensure_positive("amount")?;
        let available = self.remaining();
        if amount > available {
            return Err(DomainError::InsufficientLockFunds {
                lock_id: self.id.clone(),
                requested: amount.minor(),
                available: available.minor(),
            });
        }
        Ok(())
    }
}

/// Checks that a lock id is a single URL path segment.
///
/// Ids are letters, digits, `-` and `_`; anything else could change the
/// request path the id is placed in.
///
/// # Errors
///
/// Returns `DomainError::InvalidId` for an empty id or one with other
/// characters.
pub fn validate_lock_id(id: &str) -> DomainResult<()> {
    let valid = !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
    if valid {
        Ok(())
    } else {
        Err(DomainError::InvalidId(id.to_string()))
    }
}

/// Input for creating a lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLock {
    /// Spending category.
    pub category: String,
    /// Amount to reserve.
    pub amount: Amount,
    /// Optional label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Optional expiry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl NewLock {
    /// Validates the input.
    ///
    /// # Errors
    ///
    /// Fails on an empty category or a non-positive amount.
    pub fn validate(&self) -> DomainResult<()> {
        if self.category.trim().is_empty() {
            return Err(DomainError::MissingField("category"));
        }
        self.amount.ensure_positive("amount")?;
        Ok(())
    }
}

/// Input for spending from a lock at an outlet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Spend {
    /// Outlet or vendor being paid.
    pub outlet_id: String,
    /// Amount to pay.
    pub amount: Amount,
    /// Optional narration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Spend {
    /// Validates the input.
    ///
    /// # Errors
    ///
    /// Fails on an empty outlet id or a non-positive amount.
    pub fn validate(&self) -> DomainResult<()> {
        if self.outlet_id.trim().is_empty() {
            return Err(DomainError::MissingField("outletId"));
        }
        self.amount.ensure_positive("amount")?;
        Ok(())
    }
}
