//! Non-negative monetary amount in minor units.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Money amount in the smallest unit of the gateway currency (USD cents).
///
/// Stored as an integer to avoid floating-point precision issues. Once
/// constructed the value is immutable, and its wire form is always the same
/// string for the same amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money {
    cents: i64,
}

impl Money {
    /// Creates a new Money value.
    pub fn new(cents: i64) -> Result<Self, DomainError> {
        if cents < 0 {
            return Err(DomainError::NegativeAmount);
        }
        Ok(Self { cents })
    }

    /// Creates a zero amount.
    pub fn zero() -> Self {
        Self { cents: 0 }
    }

    /// Returns the amount in cents.
    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Formats the amount the way the processor expects it: major units with
    /// exactly two decimals (`1000` → `"10.00"`).
    pub fn to_decimal_string(&self) -> String {
        format!("{}.{:02}", self.cents / 100, self.cents % 100)
    }
}

impl TryFrom<i64> for Money {
    type Error = DomainError;

    fn try_from(cents: i64) -> Result<Self, Self::Error> {
        Money::new(cents)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.to_decimal_string())
    }
}
