//! # PayHub Types
//!
//! Domain types, processor code tables and port traits for the PayHub
//! adapter. This crate has ZERO IO dependencies - only data structures,
//! validation rules, static lookup tables and trait definitions.
//!
//! ## Layout
//!
//! - `domain/` - Pure domain types (Money, CreditCard, Address, GatewayResponse)
//! - `codes/` - Processor result code tables (CVV, AVS, standard error codes)
//! - `ports/` - Trait definitions that transport adapters must implement
//! - `dto/` - Per-call options passed into gateway operations
//! - `error/` - Domain, configuration and gateway error types

pub mod codes;
pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use codes::StandardErrorCode;
pub use domain::{
    Address, AvsResult, CreditCard, Customer, CvvResult, GatewayResponse, MerchantContext, Money,
};
pub use dto::PaymentOptions;
pub use error::{ConfigError, DomainError, GatewayError};
pub use ports::{HttpTransport, RequestHeaders, TransportError};
