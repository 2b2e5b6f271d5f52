//! Verifier backed by Google's siteverify endpoint.

use async_trait::async_trait;
use recaptcha_common::{Outcome, RecaptchaError, SiteVerifyRequest, SiteVerifyResponse};
use serde::Serialize;
use std::sync::Arc;

use super::{Verifier, policy};
use crate::config::VerifierConfig;
use crate::transport::{HttpTransport, RetryPolicy, Transport, send_with_retry};

/// Full result of one verification round-trip
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub outcome: Outcome,
    pub response: SiteVerifyResponse,
    /// Retries spent before a response was obtained
    pub retries: u32,
}

/// Remote verifier.
///
/// Holds no per-call state; share it behind an `Arc` across requests.
pub struct GoogleVerifier {
    secret: String,
    expected_action: String,
    min_score: f64,
    retry: RetryPolicy,
    transport: Arc<dyn Transport>,
}

impl GoogleVerifier {
    /// Build a verifier with the default HTTP transport
    pub fn new(config: VerifierConfig) -> Result<Self, RecaptchaError> {
        config.validate()?;
        let transport = HttpTransport::new(config.endpoint.clone(), config.timeout())?;
        Ok(Self::build(config, Arc::new(transport)))
    }

    /// Build a verifier over a caller-provided transport.
    ///
    /// `config.endpoint` and `config.timeout_secs` are ignored here: the
    /// transport decides where requests go and how long they may take.
    pub fn with_transport(
        config: VerifierConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, RecaptchaError> {
        config.validate()?;
        Ok(Self::build(config, transport))
    }

    fn build(config: VerifierConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            secret: config.secret,
            expected_action: config.expected_action,
            min_score: config.min_score,
            retry: config.retry,
            transport,
        }
    }

    pub fn expected_action(&self) -> &str {
        &self.expected_action
    }

    pub fn min_score(&self) -> f64 {
        self.min_score
    }

    /// Send the token, decode the reply, and apply the policy.
    ///
    /// Policy rejections are reported in the returned outcome, not as errors.
    pub async fn evaluate(&self, token: &str) -> Result<Evaluation, RecaptchaError> {
        if token.is_empty() {
            return Err(RecaptchaError::EmptyToken);
        }

        let request = SiteVerifyRequest::new(self.secret.as_str(), token);
        let report = send_with_retry(self.transport.as_ref(), &self.retry, &request).await?;

        let response: SiteVerifyResponse = serde_json::from_str(&report.response.body)?;
        let outcome = policy::decide(&response, self.min_score, &self.expected_action);

        tracing::debug!(
            passed = outcome.passed,
            score = response.score,
            action = %response.action,
            hostname = %response.hostname,
            retries = report.retries,
            "reCAPTCHA token evaluated"
        );

        Ok(Evaluation {
            outcome,
            response,
            retries: report.retries,
        })
    }
}

#[async_trait]
impl Verifier for GoogleVerifier {
    async fn verify(&self, token: &str) -> Result<bool, RecaptchaError> {
        let evaluation = self.evaluate(token).await?;
        match evaluation.outcome.reason {
            None => Ok(true),
            Some(rejection) => Err(RecaptchaError::Rejected(rejection)),
        }
    }
}
