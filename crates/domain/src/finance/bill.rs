//! Airtime and data bill payments.

use serde::{Deserialize, Serialize};

use super::Amount;
use crate::error::{DomainError, DomainResult};

/// Shortest and longest accepted phone numbers, counting digits only.
const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 7..=15;

/// Airtime top-up request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AirtimePurchase {
    /// Number to credit.
    pub phone_number: String,
    /// Mobile network, e.g. `mtn`.
    pub network: String,
    /// Airtime value.
    pub amount: Amount,
    /// Lock to pay from; the main balance when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock_id: Option<String>,
}

impl AirtimePurchase {
    /// Validates the input.
    ///
    /// # Errors
    ///
    /// Fails on a malformed phone number, empty network or non-positive amount.
    pub fn validate(&self) -> DomainResult<()> {
        validate_phone_number(&self.phone_number)?;
        if self.network.trim().is_empty() {
            return Err(DomainError::MissingField("network"));
        }
        self.amount.ensure_positive("amount")?;
        Ok(())
    }
}

/// Data bundle purchase request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPurchase {
    /// Number to credit.
    pub phone_number: String,
    /// Mobile network.
    pub network: String,
    /// Plan from `DataPlan::id`.
    pub plan_id: String,
    /// Lock to pay from; the main balance when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lock_id: Option<String>,
}

impl DataPurchase {
    /// Validates the input.
    ///
    /// # Errors
    ///
    /// Fails on a malformed phone number or empty network/plan.
    pub fn validate(&self) -> DomainResult<()> {
        validate_phone_number(&self.phone_number)?;
        if self.network.trim().is_empty() {
            return Err(DomainError::MissingField("network"));
        }
        if self.plan_id.trim().is_empty() {
            return Err(DomainError::MissingField("planId"));
        }
        Ok(())
    }
}

/// A purchasable data bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPlan {
    /// Plan identifier.
    pub id: String,
    /// Display name, e.g. `1.5GB - 30 days`.
    pub name: String,
    /// Network the plan belongs to.
    pub network: String,
    /// Price.
    pub price: Amount,
    /// Validity description.
    #[serde(default)]
    pub validity: Option<String>,
}

fn validate_phone_number(phone: &str) -> DomainResult<()> {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    if PHONE_DIGITS.contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(DomainError::InvalidPhoneNumber(phone.to_string()))
    }
}
