//! Error types for the PayHub adapter.

use crate::ports::TransportError;

/// Domain-level errors (invalid caller input).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Amount cannot be negative")]
    NegativeAmount,

    #[error("Invalid expiry month: {0}")]
    InvalidExpiryMonth(u8),
}

/// Configuration errors raised while constructing a gateway.
///
/// These are raised before any network call is attempted.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required option: {0}")]
    MissingField(&'static str),
}

/// Errors a gateway operation can raise.
///
/// Processor declines and undecodable processor bodies are NOT errors; they
/// come back as an unsuccessful `GatewayResponse`. Only infrastructure
/// failures end up here.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),
}
