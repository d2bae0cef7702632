//! Merchant identity attached to every request.

/// Organization and terminal the gateway transacts for.
///
/// Set once when the gateway is constructed and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerchantContext {
    organization_id: String,
    terminal_id: String,
}

impl MerchantContext {
    pub fn new(organization_id: impl Into<String>, terminal_id: impl Into<String>) -> Self {
        Self {
            organization_id: organization_id.into(),
            terminal_id: terminal_id.into(),
        }
    }

    pub fn organization_id(&self) -> &str {
        &self.organization_id
    }

    pub fn terminal_id(&self) -> &str {
        &self.terminal_id
    }
}
