//! Outbound transport for the siteverify call.
//!
//! The verifier only needs "send this request, give me status and body";
//! retry and backoff live in [`retry`] on top of any [`Transport`].

mod retry;
#[cfg(test)]
pub(crate) mod testing;

pub use retry::{RetryPolicy, RetryReport, send_with_retry};

use async_trait::async_trait;
use recaptcha_common::{RecaptchaError, SiteVerifyRequest};
use std::time::Duration;

/// Raw HTTP response from the verification endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a siteverify request and returns the raw response.
///
/// Implementations report network-level failures as
/// [`RecaptchaError::Transport`] with no status; any received response,
/// whatever its status, is returned as `Ok`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &SiteVerifyRequest) -> Result<TransportResponse, RecaptchaError>;
}

/// `reqwest`-backed transport posting form-encoded parameters.
///
/// Cloning shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    /// Build a client with the given request timeout
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, RecaptchaError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RecaptchaError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self::from_client(client, endpoint))
    }

    /// Reuse a caller-owned client (its own timeout and pool settings apply)
    pub fn from_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &SiteVerifyRequest) -> Result<TransportResponse, RecaptchaError> {
        let response = self
            .client
            .post(&self.endpoint)
            .form(&request.form())
            .send()
            .await
            .map_err(|e| RecaptchaError::network(format!("siteverify request failed: {e}")))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| RecaptchaError::network(format!("Failed to read siteverify body: {e}")))?;

        Ok(TransportResponse { status, body })
    }
}
