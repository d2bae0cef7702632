//! Gateway configuration from flags and environment.

use std::time::Duration;

use clap::Args;

use payhub_gateway::GatewayConfig;

/// PayHub credentials. Each flag falls back to a `PAYHUB_*` variable, which
/// may also come from a `.env` file.
#[derive(Args, Debug)]
pub struct Credentials {
    /// Organization id
    #[arg(long, env = "PAYHUB_ORG_ID", global = true)]
    pub org_id: Option<String>,

    /// API username (required by PayHub, not sent with requests)
    #[arg(long, env = "PAYHUB_USERNAME", global = true)]
    pub username: Option<String>,

    /// API token, sent as a bearer credential
    #[arg(long, env = "PAYHUB_PASSWORD", hide_env_values = true, global = true)]
    pub password: Option<String>,

    /// Terminal id
    #[arg(long, env = "PAYHUB_TERMINAL_ID", global = true)]
    pub terminal_id: Option<String>,

    /// Send requests in demo mode
    #[arg(long = "test-mode", env = "PAYHUB_TEST_MODE", global = true)]
    pub test_mode: bool,

    /// Override the API base URL
    #[arg(long, env = "PAYHUB_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "PAYHUB_TIMEOUT_SECS", default_value_t = 30, global = true)]
    pub timeout_secs: u64,
}

impl Credentials {
    /// Builds the gateway configuration. Missing values are reported by the
    /// gateway itself when it is constructed.
    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig {
            org_id: self.org_id.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            terminal_id: self.terminal_id.clone(),
            test: self.test_mode,
            base_url: self.base_url.clone(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
