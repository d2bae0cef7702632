//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The gateway depends on these traits, not concrete HTTP clients.

mod transport;

pub use transport::{HttpTransport, RequestHeaders, TransportError};
