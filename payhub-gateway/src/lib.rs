//! # PayHub Gateway
//!
//! Credit card operations against the PayHub API.
//!
//! ## Architecture
//!
//! - `request/` - Pure payload builders (domain inputs → PayHub JSON)
//! - `response/` - Response interpreter (raw body → `GatewayResponse`)
//! - `refund/` - Void-then-refund state machine
//! - `gateway/` - Operation facade composing the above
//! - `config/` - Credentials and mode
//!
//! The gateway is generic over `T: HttpTransport`, allowing different
//! transports (reqwest, mocks, proxies) to be injected.

pub mod config;
pub mod gateway;
pub mod refund;
pub mod request;
pub mod response;

#[cfg(test)]
mod gateway_tests;

pub use config::{GatewayConfig, LIVE_URL, TEST_URL};
pub use gateway::{Action, PayHubGateway};
pub use refund::RefundFlow;
