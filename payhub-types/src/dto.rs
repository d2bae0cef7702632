//! Per-call options for gateway operations.

use crate::domain::{Address, Customer, Money};

/// Optional data accompanying authorize, purchase and verify.
///
/// Everything here is optional; `PaymentOptions::default()` is a valid
/// (empty) option set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentOptions {
    pub customer: Customer,
    /// Address to verify against; takes precedence over `billing_address`
    pub address: Option<Address>,
    pub billing_address: Option<Address>,
    pub tax_amount: Option<Money>,
    pub shipping_amount: Option<Money>,
    pub invoice_number: Option<String>,
}

impl PaymentOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_customer(mut self, customer: Customer) -> Self {
        self.customer = customer;
        self
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    pub fn with_billing_address(mut self, address: Address) -> Self {
        self.billing_address = Some(address);
        self
    }

    pub fn with_tax_amount(mut self, amount: Money) -> Self {
        self.tax_amount = Some(amount);
        self
    }

    pub fn with_shipping_amount(mut self, amount: Money) -> Self {
        self.shipping_amount = Some(amount);
        self
    }

    pub fn with_invoice_number(mut self, invoice_number: impl Into<String>) -> Self {
        self.invoice_number = Some(invoice_number.into());
        self
    }

    /// The address sent with the card: `address`, falling back to
    /// `billing_address`.
    pub fn effective_address(&self) -> Option<&Address> {
        self.address.as_ref().or(self.billing_address.as_ref())
    }
}
