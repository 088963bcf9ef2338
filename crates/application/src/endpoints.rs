//! API paths, relative to the configured base URL.

/// Email/password login.
pub const LOGIN: &str = "/api/v1/auth/login";
/// Refresh token exchange.
pub const REFRESH_TOKEN: &str = "/api/v1/auth/refresh-token";
/// Signed-in user's profile.
pub const PROFILE: &str = "/api/v1/users/profile";
/// Wallet balance.
pub const WALLET: &str = "/api/v1/wallet";
/// Budget locks collection.
pub const LOCKS: &str = "/api/v1/locks";
/// Outlets and vendors.
pub const OUTLETS: &str = "/api/v1/outlets";
/// Airtime purchase.
pub const AIRTIME: &str = "/api/v1/bills/airtime";
/// Data bundle purchase.
pub const DATA: &str = "/api/v1/bills/data";
/// Data bundle catalogue.
pub const DATA_PLANS: &str = "/api/v1/bills/data-plans";
/// Transaction history.
pub const TRANSACTIONS: &str = "/api/v1/transactions";

/// Spend endpoint for a single lock. `lock_id` must already have passed
/// `validate_lock_id`.
#[must_use]
pub fn lock_spend(lock_id: &str) -> String {
    format!("{LOCKS}/{lock_id}/spend")
}
