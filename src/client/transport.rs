//! HTTP transport seam.
//!
//! [`SearchClient`](super::SearchClient) talks to the network only through the
//! [`Transport`] trait, so tests can script responses and timings without a server.

use crate::domain::error::{CinesearchError, Result};
use crate::domain::SearchError;
use async_trait::async_trait;
use std::time::Duration;

/// Raw HTTP response handed back by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Issues GET requests with query parameters.
///
/// Implementations report network-level failures (DNS, connect, timeout, body
/// read) as [`SearchError::Transport`]. Non-2xx statuses are not errors at this
/// level; they are returned as-is for the caller to interpret.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> std::result::Result<HttpResponse, SearchError>;
}

/// Production transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Option<Duration>,
}

impl ReqwestTransport {
    /// Builds a transport with an optional per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`CinesearchError::Transport`] if the TLS backend cannot be initialized.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("cinesearch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CinesearchError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, timeout })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(
        &self,
        url: &str,
        params: &[(&str, String)],
    ) -> std::result::Result<HttpResponse, SearchError> {
        let mut request = self.client.get(url).query(params);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        // reqwest errors carry the full URL, api key included.
        let response = request.send().await.map_err(|e| {
            let e = e.without_url();
            tracing::warn!(error = %e, timeout = e.is_timeout(), "request failed");
            SearchError::transport(if e.is_timeout() {
                "request timed out".to_string()
            } else {
                format!("request failed: {e}")
            })
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            SearchError::transport(format!("failed to read response body: {}", e.without_url()))
        })?;

        tracing::debug!(status, bytes = body.len(), "response received");
        Ok(HttpResponse { status, body })
    }
}
