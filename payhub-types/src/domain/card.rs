//! Credit card domain model.

use std::fmt;

use crate::error::DomainError;

/// Credit card details for a single request.
///
/// Cards are handed to the gateway per call and are never cached; the
/// request builder copies what it needs into a fresh payload every time.
/// The cardholder name is not part of the card: PayHub takes names from the
/// customer block only.
#[derive(Clone, PartialEq, Eq)]
pub struct CreditCard {
    number: String,
    month: u8,
    year: u16,
    verification_value: Option<String>,
}

impl CreditCard {
    /// Creates a new card.
    ///
    /// # Validation
    /// - Month must be between 1 and 12
    pub fn new(number: impl Into<String>, month: u8, year: u16) -> Result<Self, DomainError> {
        if !(1..=12).contains(&month) {
            return Err(DomainError::InvalidExpiryMonth(month));
        }
        Ok(Self {
            number: number.into(),
            month,
            year,
            verification_value: None,
        })
    }

    /// Sets the card verification value (CVV/CVC).
    pub fn with_verification_value(mut self, value: impl Into<String>) -> Self {
        self.verification_value = Some(value.into());
        self
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn verification_value(&self) -> Option<&str> {
        self.verification_value.as_deref()
    }

    /// Expiry in `YYYY/MM` form.
    pub fn expiry_date(&self) -> String {
        format!("{:04}/{:02}", self.year, self.month)
    }

    /// Last four digits of the card number.
    pub fn last_digits(&self) -> &str {
        let len = self.number.len();
        self.number.get(len.saturating_sub(4)..).unwrap_or_default()
    }
}

impl fmt::Debug for CreditCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreditCard")
            .field("number", &format_args!("****{}", self.last_digits()))
            .field("month", &self.month)
            .field("year", &self.year)
            .field(
                "verification_value",
                &self.verification_value.as_ref().map(|_| "***"),
            )
            .finish()
    }
}
