//! # PayHub Client
//!
//! `HttpTransport` implementation on top of `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use payhub_types::{HttpTransport, RequestHeaders, TransportError};

/// Error type for building a transport.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// reqwest-backed transport.
///
/// Timeouts are the transport's business: the gateway never retries or
/// cancels on its own.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
    timeout: Option<Duration>,
}

impl ReqwestTransport {
    /// Creates a transport with reqwest defaults (no timeout).
    pub fn new() -> Self {
        Self {
            http: Client::new(),
            timeout: None,
        }
    }

    /// Creates a transport from an existing client.
    pub fn with_client(http: Client) -> Self {
        Self {
            http,
            timeout: None,
        }
    }

    /// Sets a per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds a transport with a connect timeout baked into the client.
    pub fn with_connect_timeout(timeout: Duration) -> Result<Self, ClientError> {
        let http = Client::builder().connect_timeout(timeout).build()?;
        Ok(Self::with_client(http))
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post(
        &self,
        url: &str,
        body: String,
        headers: &RequestHeaders,
    ) -> Result<String, TransportError> {
        let mut req = self.http.post(url).body(body);
        for (name, value) in headers {
            req = req.header(*name, value);
        }
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        let resp = req.send().await.map_err(network_error)?;
        let status = resp.status();
        debug!(status = status.as_u16(), %url, "PayHub HTTP response");

        if status.is_success() {
            resp.text().await.map_err(network_error)
        } else {
            // A body cut off mid-read leaves the outcome unknown
            let body = resp.text().await.map_err(network_error)?;
            Err(TransportError::Response {
                status: status.as_u16(),
                body,
            })
        }
    }
}

fn network_error(err: reqwest::Error) -> TransportError {
    TransportError::Network(err.to_string())
}
