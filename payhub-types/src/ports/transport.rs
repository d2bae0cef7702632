//! HTTP transport port.
//!
//! The gateway only ever needs a JSON POST. Implementations can be a
//! reqwest client, a recording mock, a proxy, etc. Timeout and retry policy
//! belong to the implementation, never to the gateway.

/// Ordered list of header name/value pairs sent with a request.
pub type RequestHeaders = Vec<(&'static str, String)>;

/// Error type for transport operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The processor answered with a non-2xx status. The body is kept so the
    /// gateway can still interpret it.
    #[error("Processor returned HTTP {status}")]
    Response { status: u16, body: String },

    /// The request never produced a response (DNS, TLS, connection reset,
    /// timeout, ...).
    #[error("Network failure: {0}")]
    Network(String),
}

impl TransportError {
    /// Returns the response body if the processor sent one.
    pub fn body(&self) -> Option<&str> {
        match self {
            TransportError::Response { body, .. } => Some(body),
            TransportError::Network(_) => None,
        }
    }
}

/// Port trait for HTTP transports.
#[async_trait::async_trait]
pub trait HttpTransport: Send + Sync {
    /// POSTs `body` to `url` with the given headers.
    ///
    /// Returns the raw response body on a 2xx status.
    async fn post(
        &self,
        url: &str,
        body: String,
        headers: &RequestHeaders,
    ) -> Result<String, TransportError>;
}

#[async_trait::async_trait]
impl<T: HttpTransport + ?Sized> HttpTransport for std::sync::Arc<T> {
    async fn post(
        &self,
        url: &str,
        body: String,
        headers: &RequestHeaders,
    ) -> Result<String, TransportError> {
        (**self).post(url, body, headers).await
    }
}
