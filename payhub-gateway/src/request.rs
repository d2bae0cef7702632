//! PayHub request payloads.
//!
//! Pure assembly functions, one per concern. Each operation in the gateway
//! picks the ones it needs:
//!
//! | Operation | Card+Address | Bill | Customer | Reference |
//! |-----------|--------------|------|----------|-----------|
//! | authorize | yes | yes | yes | no |
//! | purchase  | yes | yes | yes | no |
//! | capture   | no  | amount only | no | yes |
//! | void      | no  | no  | no  | yes |
//! | refund    | no  | no  | no  | yes |
//! | verify    | yes | no  | yes | no |
//!
//! Optional values are omitted from the JSON rather than sent as `null`,
//! except inside `customer`, which always carries its four keys.

use std::fmt;

use serde::Serialize;

use payhub_types::{Address, CreditCard, Customer, MerchantContext, Money};

/// Fixed flag telling PayHub a verification value accompanies the card.
const CVV_PRESENT: &str = "Y";

/// Top-level request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayHubRequest {
    pub merchant: MerchantBlock,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_data: Option<CardData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_format: Option<RecordFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill: Option<Bill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<CustomerData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MerchantBlock {
    pub organization_id: String,
    pub terminal_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Demo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RecordFormat {
    #[serde(rename = "CC")]
    CreditCard,
}

#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct CardData {
    pub card_number: String,
    /// `YYYY/MM`
    pub card_expiry_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cvv_data: Option<String>,
    pub cvv_code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_address_1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_address_2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_zip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_city: Option<String>,
}

impl fmt::Debug for CardData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = self.card_number.len();
        let last = self.card_number.get(len.saturating_sub(4)..).unwrap_or_default();
        f.debug_struct("CardData")
            .field("card_number", &format_args!("****{}", last))
            .field("card_expiry_date", &self.card_expiry_date)
            .field("cvv_data", &self.cvv_data.as_ref().map(|_| "***"))
            .field("cvv_code", &self.cvv_code)
            .field("billing_zip", &self.billing_zip)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bill {
    pub base_amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,
}

/// Customer block. Absent values serialize as `null`; the block itself is
/// always present for card operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CustomerData {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub email_address: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Builders
// ─────────────────────────────────────────────────────────────────────────────

/// Starts a request with the merchant block, plus the demo marker in test mode.
pub fn build_base(merchant: &MerchantContext, test_mode: bool) -> PayHubRequest {
    PayHubRequest {
        merchant: MerchantBlock {
            organization_id: merchant.organization_id().to_string(),
            terminal_id: merchant.terminal_id().to_string(),
        },
        mode: test_mode.then_some(Mode::Demo),
        card_data: None,
        record_format: None,
        bill: None,
        customer: None,
        transaction_id: None,
    }
}

/// Adds the card block and record format. Address fields are copied one by
/// one when an address is given; no address adds nothing.
pub fn add_card_data(post: &mut PayHubRequest, card: &CreditCard, address: Option<&Address>) {
    let mut card_data = CardData {
        card_number: card.number().to_string(),
        card_expiry_date: card.expiry_date(),
        cvv_data: card.verification_value().map(str::to_string),
        cvv_code: CVV_PRESENT,
        billing_address_1: None,
        billing_address_2: None,
        billing_zip: None,
        billing_state: None,
        billing_city: None,
    };
    add_address(&mut card_data, address);

    post.card_data = Some(card_data);
    post.record_format = Some(RecordFormat::CreditCard);
}

fn add_address(card_data: &mut CardData, address: Option<&Address>) {
    let Some(address) = address else {
        return;
    };
    card_data.billing_address_1 = address.address1.clone();
    card_data.billing_address_2 = address.address2.clone();
    card_data.billing_zip = address.zip.clone();
    card_data.billing_state = address.state.clone();
    card_data.billing_city = address.city.clone();
}

/// Adds the bill. Optional amounts and the invoice number appear only when
/// supplied.
pub fn add_bill(
    post: &mut PayHubRequest,
    base_amount: Money,
    tax_amount: Option<Money>,
    shipping_amount: Option<Money>,
    invoice_number: Option<&str>,
) {
    post.bill = Some(Bill {
        base_amount: base_amount.to_decimal_string(),
        tax_amount: tax_amount.map(|m| m.to_decimal_string()),
        shipping_amount: shipping_amount.map(|m| m.to_decimal_string()),
        invoice_number: invoice_number.map(str::to_string),
    });
}

/// Adds the customer block.
pub fn add_customer_data(post: &mut PayHubRequest, customer: &Customer) {
    post.customer = Some(CustomerData {
        first_name: customer.first_name.clone(),
        last_name: customer.last_name.clone(),
        phone_number: customer.phone.clone(),
        email_address: customer.email.clone(),
    });
}

/// Points the request at an earlier transaction.
pub fn add_reference(post: &mut PayHubRequest, transaction_id: &str) {
    post.transaction_id = Some(transaction_id.to_string());
}
