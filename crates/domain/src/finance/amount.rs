//! Money amounts in minor units.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// An amount of money in minor units (1/100 of the currency unit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(pub i64);

impl Amount {
    /// Zero.
    pub const ZERO: Self = Self(0);

    /// Creates an amount from minor units.
    #[must_use]
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Returns the value in minor units.
    #[must_use]
    pub const fn minor(self) -> i64 {
        self.0
    }

    /// Subtraction that floors at zero.
    #[must_use]
    pub const fn saturating_sub(self, other: Self) -> Self {
        let value = self.0.saturating_sub(other.0);
        if value < 0 { Self::ZERO } else { Self(value) }
    }

    /// Fails unless the amount is strictly positive.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAmount` naming `field`.
    pub fn ensure_positive(self, field: &str) -> DomainResult<Self> {
        if self.0 > 0 {
            Ok(self)
        } else {
            Err(DomainError::InvalidAmount(format!(
                "{field} must be greater than zero, got {self}"
            )))
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

/// Parses a major-unit decimal such as `1500`, `1500.5` or `1500.50`.
impl FromStr for Amount {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidAmount(format!("'{s}' is not a valid amount"));
        let trimmed = s.trim();
        let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || fraction.len() > 2 || !all_digits(whole) || !all_digits(fraction) {
            return Err(invalid());
        }

        let whole: i64 = whole.parse().map_err(|_| invalid())?;
        let cents: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };

        whole
            .checked_mul(100)
            .and_then(|minor| minor.checked_add(cents))
            .map(Self)
            .ok_or_else(invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display() {
        assert_eq!(Amount(150_050).to_string(), "1500.50");
        assert_eq!(Amount(5).to_string(), "0.05");
        assert_eq!(Amount(-250).to_string(), "-2.50");
    }

    #[test]
    fn test_ensure_positive() {
        assert!(Amount(1).ensure_positive("amount").is_ok());
        assert!(matches!(
            Amount(0).ensure_positive("amount"),
            Err(DomainError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_parse_major_units() {
        assert_eq!("1500".parse::<Amount>(), Ok(Amount(150_000)));
        assert_eq!("1500.5".parse::<Amount>(), Ok(Amount(150_050)));
        assert_eq!(" 0.07 ".parse::<Amount>(), Ok(Amount(7)));
        for bad in ["", ".50", "1.234", "-5", "1,000", "abc", "99999999999999999999"] {
            assert!(bad.parse::<Amount>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn test_saturating_sub() {
        assert_eq!(Amount(500).saturating_sub(Amount(200)), Amount(300));
        assert_eq!(Amount(200).saturating_sub(Amount(500)), Amount::ZERO);
    }
}
