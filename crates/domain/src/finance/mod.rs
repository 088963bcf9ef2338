//! Wallet, budget locks, outlets and bill payments.
//!
//! All amounts are integer minor units (kobo, cents) to keep arithmetic
//! exact. Request inputs validate themselves before being sent.

mod amount;
mod bill;
mod lock;
mod outlet;
mod transaction;
mod wallet;

pub use amount::Amount;
pub use bill::{AirtimePurchase, DataPlan, DataPurchase};
pub use lock::{Lock, LockStatus, NewLock, Spend, validate_lock_id};
pub use outlet::Outlet;
pub use transaction::{Transaction, TransactionKind};
pub use wallet::Wallet;
