//! Wallet balance.

use serde::{Deserialize, Serialize};

use super::Amount;

/// The user's wallet as reported by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    /// Total balance.
    pub balance: Amount,
    /// Portion of the balance reserved by active locks.
    #[serde(default)]
    pub locked_balance: Amount,
    /// ISO currency code.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "NGN".to_string()
}

impl Wallet {
    /// Funds not reserved by any lock.
    #[must_use]
    pub const fn available(&self) -> Amount {
        self.balance.saturating_sub(self.locked_balance)
    }
}
