//! Bounded retry with exponential backoff.

use recaptcha_common::constants::{DEFAULT_BASE_WAIT_MS, DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_WAIT_MS};
use recaptcha_common::{RecaptchaError, SiteVerifyRequest};
use serde::Deserialize;
use std::time::Duration;

use super::{Transport, TransportResponse};

/// Retry policy for the siteverify call.
///
/// Retries on transport failure or status >= 500; everything else is
/// returned on the first attempt.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts, first try included (0 behaves as 1)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Wait before the first retry
    #[serde(default = "default_base_wait_ms")]
    pub base_wait_ms: u64,

    /// Cap on any single wait
    #[serde(default = "default_max_wait_ms")]
    pub max_wait_ms: u64,
}

fn default_max_attempts() -> u32 { DEFAULT_MAX_ATTEMPTS }
fn default_base_wait_ms() -> u64 { DEFAULT_BASE_WAIT_MS }
fn default_max_wait_ms() -> u64 { DEFAULT_MAX_WAIT_MS }

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_wait_ms: default_base_wait_ms(),
            max_wait_ms: default_max_wait_ms(),
        }
    }
}

impl RetryPolicy {
    /// Single attempt, no retries
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Default::default()
        }
    }

    /// `attempts` tries with no waiting in between
    pub fn immediate(attempts: u32) -> Self {
        Self {
            max_attempts: attempts,
            base_wait_ms: 0,
            max_wait_ms: 0,
        }
    }

    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    pub fn base_wait(&self) -> Duration {
        Duration::from_millis(self.base_wait_ms)
    }

    pub fn max_wait(&self) -> Duration {
        Duration::from_millis(self.max_wait_ms)
    }

    /// Wait before retry number `retry` (1-based): base * 2^(retry-1), capped
    pub fn wait_for(&self, retry: u32) -> Duration {
        let factor = 2u32.saturating_pow(retry.saturating_sub(1));
        self.base_wait().saturating_mul(factor).min(self.max_wait())
    }

    /// Whether a failed attempt qualifies for another try
    pub fn should_retry(&self, error: &RecaptchaError) -> bool {
        error.is_retryable()
    }
}

/// Successful response plus how many retries it took
#[derive(Debug, Clone)]
pub struct RetryReport {
    pub response: TransportResponse,
    pub retries: u32,
}

/// Send `request` until it yields a 2xx response or the policy gives up.
///
/// Waits run on the calling task; the caller is blocked for at most the sum
/// of the policy's waits plus the transport's own timeouts.
pub async fn send_with_retry(
    transport: &dyn Transport,
    policy: &RetryPolicy,
    request: &SiteVerifyRequest,
) -> Result<RetryReport, RecaptchaError> {
    let max_attempts = policy.attempts();
    let mut attempt = 1;

    loop {
        tracing::debug!(attempt, max_attempts, "Sending siteverify request");

        let error = match transport.send(request).await {
            Ok(response) if response.is_success() => {
                return Ok(RetryReport {
                    response,
                    retries: attempt - 1,
                });
            }
            Ok(response) => RecaptchaError::status(response.status),
            Err(e) => e,
        };

        if !policy.should_retry(&error) || attempt >= max_attempts {
            if attempt > 1 {
                tracing::warn!(attempt, error = %error, "siteverify giving up");
            }
            return Err(error);
        }

        let wait = policy.wait_for(attempt);
        tracing::warn!(
            attempt,
            max_attempts,
            wait_ms = wait.as_millis() as u64,
            error = %error,
            "siteverify attempt failed, retrying"
        );
        tokio::time::sleep(wait).await;
        attempt += 1;
    }
}
