//! Outlets and vendors that accept payment from locks.

use serde::{Deserialize, Serialize};

/// A vendor funds can be spent at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outlet {
    /// Server-side identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Category it is listed under; matches lock categories.
    pub category: String,
    /// Street address, if published.
    #[serde(default)]
    pub address: Option<String>,
}
