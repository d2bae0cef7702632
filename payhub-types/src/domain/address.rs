//! Billing address and customer contact details.

use serde::{Deserialize, Serialize};

/// Billing address. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
}

/// Customer contact details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl Address {
    /// Returns true when no field is set.
    pub fn is_empty(&self) -> bool {
        self.address1.is_none()
            && self.address2.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.zip.is_none()
    }
}
