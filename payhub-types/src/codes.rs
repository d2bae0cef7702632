//! PayHub result code tables.
//!
//! Static, read-only mappings from processor codes to normalized meanings.
//! Each table is declared once through `code_table!`, which generates both
//! the iterable entry list and a `match`-based lookup. Unknown codes are
//! never an error: the lookup yields `None` and callers pass the raw code
//! through.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized decline taxonomy shared by every gateway result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StandardErrorCode {
    InvalidNumber,
    InvalidExpiryDate,
    InvalidCvc,
    ExpiredCard,
    CardDeclined,
    CallIssuer,
    PickupCard,
}

impl StandardErrorCode {
    /// Returns the snake_case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            StandardErrorCode::InvalidNumber => "invalid_number",
            StandardErrorCode::InvalidExpiryDate => "invalid_expiry_date",
            StandardErrorCode::InvalidCvc => "invalid_cvc",
            StandardErrorCode::ExpiredCard => "expired_card",
            StandardErrorCode::CardDeclined => "card_declined",
            StandardErrorCode::CallIssuer => "call_issuer",
            StandardErrorCode::PickupCard => "pickup_card",
        }
    }
}

impl fmt::Display for StandardErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declares a code table and its lookup function.
///
/// # Syntax
/// ```ignore
/// code_table! {
///     TABLE_NAME, fn lookup_fn -> ValueType {
///         "code" => value,
///     }
/// }
/// ```
macro_rules! code_table {
    (
        $(#[$meta:meta])*
        $table:ident, fn $lookup:ident -> $value:ty {
            $($code:literal => $meaning:expr),* $(,)?
        }
    ) => {
        $(#[$meta])*
        pub const $table: &[(&str, $value)] = &[$(($code, $meaning)),*];

        /// Looks up a processor code. Unknown codes yield `None`.
        pub fn $lookup(code: &str) -> Option<$value> {
            match code {
                $($code => Some($meaning),)*
                _ => None,
            }
        }
    };
}

// ─────────────────────────────────────────────────────────────────────────────
// Card verification (VERIFICATION_RESULT_CODE)
// ─────────────────────────────────────────────────────────────────────────────

code_table! {
    /// CVV result code → meaning.
    CVV_CODES, fn cvv_message -> &'static str {
        "M" => "CVV matches",
        "N" => "CVV does not match",
        "P" => "CVV not processed",
        "S" => "CVV should have been present",
        "U" => "CVV request unable to be processed by issuer",
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Address verification (AVS_RESULT_CODE)
// ─────────────────────────────────────────────────────────────────────────────

code_table! {
    /// AVS result code → meaning. Digits `1`-`8` are AMEX-only variants.
    AVS_CODES, fn avs_message -> &'static str {
        "0" => "Approved, Address verification was not requested.",
        "A" => "Approved, Address matches only.",
        "B" => "Address Match. Street Address math for international transaction Postal Code not verified because of incompatible formats (Acquirer sent both street address and Postal Code)",
        "C" => "Serv Unavailable. Street address and Postal Code not verified for international transaction because of incompatible formats (Acquirer sent both street and Postal Code).",
        "D" => "Exact Match, Street Address and Postal Code match for international transaction.",
        "F" => "Exact Match, Street Address and Postal Code match. Applies to UK only.",
        "G" => "Ver Unavailable, Non-U.S. Issuer does not participate.",
        "I" => "Ver Unavailable, Address information not verified for international transaction",
        "M" => "Exact Match, Street Address and Postal Code match for international transaction",
        "N" => "No - Address and ZIP Code does not match",
        "P" => "Zip Match, Postal Codes match for international transaction Street address not verified because of incompatible formats (Acquirer sent both street address and Postal Code).",
        "R" => "Retry - Issuer system unavailable",
        "S" => "Serv Unavailable, Service not supported",
        "U" => "Ver Unavailable, Address unavailable.",
        "W" => "ZIP match - Nine character numeric ZIP match only.",
        "X" => "Exact match, Address and nine-character ZIP match.",
        "Y" => "Exact Match, Address and five character ZIP match.",
        "Z" => "Zip Match, Five character numeric ZIP match only.",
        "1" => "Cardholder name and ZIP match AMEX only.",
        "2" => "Cardholder name, address, and ZIP match AMEX only.",
        "3" => "Cardholder name and address match AMEX only.",
        "4" => "Cardholder name match AMEX only.",
        "5" => "Cardholder name incorrect, ZIP match AMEX only.",
        "6" => "Cardholder name incorrect, address and ZIP match AMEX only.",
        "7" => "Cardholder name incorrect, address match AMEX only.",
        "8" => "Cardholder, all do not match AMEX only.",
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Processor response codes (RESPONSE_CODE)
// ─────────────────────────────────────────────────────────────────────────────

code_table! {
    /// Processor response code → standard error code.
    ERROR_CODES, fn standard_error_code -> StandardErrorCode {
        "14" => StandardErrorCode::InvalidNumber,
        "80" => StandardErrorCode::InvalidExpiryDate,
        "82" => StandardErrorCode::InvalidCvc,
        "54" => StandardErrorCode::ExpiredCard,
        "51" => StandardErrorCode::CardDeclined,
        "05" => StandardErrorCode::CardDeclined,
        "61" => StandardErrorCode::CardDeclined,
        "62" => StandardErrorCode::CardDeclined,
        "65" => StandardErrorCode::CardDeclined,
        "93" => StandardErrorCode::CardDeclined,
        "01" => StandardErrorCode::CallIssuer,
        "02" => StandardErrorCode::CallIssuer,
        "04" => StandardErrorCode::PickupCard,
        "07" => StandardErrorCode::PickupCard,
        "41" => StandardErrorCode::PickupCard,
        "43" => StandardErrorCode::PickupCard,
    }
}
