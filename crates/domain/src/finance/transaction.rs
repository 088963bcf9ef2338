//! Wallet transaction history.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Amount;

/// What a transaction was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Payment at an outlet.
    Spend,
    /// Airtime top-up.
    Airtime,
    /// Data bundle.
    Data,
    /// Funds reserved into a lock.
    Lock,
    /// Money added to the wallet.
    Deposit,
    /// Anything this client does not know about yet.
    #[serde(other)]
    Other,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Spend => "spend",
            Self::Airtime => "airtime",
            Self::Data => "data",
            Self::Lock => "lock",
            Self::Deposit => "deposit",
            Self::Other => "other",
        })
    }
}

/// A single wallet movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Server-side identifier.
    pub id: String,
    /// Kind of movement.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// Amount moved.
    pub amount: Amount,
    /// Narration.
    #[serde(default)]
    pub description: String,
    /// Provider reference for bill payments.
    #[serde(default)]
    pub reference: Option<String>,
    /// When it happened.
    pub created_at: DateTime<Utc>,
}
