//! Gateway configuration.

use std::fmt;

use payhub_types::{ConfigError, MerchantContext};

/// Production endpoint. PayHub uses the same host for demo traffic and tells
/// the two apart with `mode: "demo"` in the payload.
pub const LIVE_URL: &str = "https://api.payhub.com/api/v2";
pub const TEST_URL: &str = LIVE_URL;

/// Credentials and mode for a `PayHubGateway`.
///
/// All four credentials are required; `PayHubGateway::new` rejects a config
/// where any of them is missing or blank.
#[derive(Clone, Default)]
pub struct GatewayConfig {
    pub org_id: Option<String>,
    /// Required, but not sent anywhere: requests authenticate with the
    /// password as a bearer token.
    pub username: Option<String>,
    pub password: Option<String>,
    pub terminal_id: Option<String>,
    /// Send `mode: "demo"` with every request
    pub test: bool,
    /// Overrides the endpoint (sandbox proxies, local stubs)
    pub base_url: Option<String>,
}

impl GatewayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_org_id(mut self, org_id: impl Into<String>) -> Self {
        self.org_id = Some(org_id.into());
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_terminal_id(mut self, terminal_id: impl Into<String>) -> Self {
        self.terminal_id = Some(terminal_id.into());
        self
    }

    pub fn with_test(mut self, test: bool) -> Self {
        self.test = test;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Checks required fields and splits the config into what the gateway
    /// keeps.
    pub(crate) fn validate(self) -> Result<ValidatedConfig, ConfigError> {
        let org_id = require(self.org_id, "orgid")?;
        require(self.username, "username")?;
        let password = require(self.password, "password")?;
        let terminal_id = require(self.terminal_id, "tid")?;

        let base_url = self
            .base_url
            .unwrap_or_else(|| (if self.test { TEST_URL } else { LIVE_URL }).to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(ValidatedConfig {
            merchant: MerchantContext::new(org_id, terminal_id),
            password,
            test: self.test,
            base_url,
        })
    }
}

impl fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("org_id", &self.org_id)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("terminal_id", &self.terminal_id)
            .field("test", &self.test)
            .field("base_url", &self.base_url)
            .finish()
    }
}

pub(crate) struct ValidatedConfig {
    pub merchant: MerchantContext,
    pub password: String,
    pub test: bool,
    pub base_url: String,
}

fn require(value: Option<String>, name: &'static str) -> Result<String, ConfigError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::MissingField(name))
}
