//! Configuration management for reCAPTCHA verification.

use anyhow::{Context, Result};
use recaptcha_common::RecaptchaError;
use recaptcha_common::constants::{DEFAULT_MIN_SCORE, DEFAULT_TIMEOUT_SECS, SITEVERIFY_URL};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use crate::transport::RetryPolicy;

/// Parameters for a Google-backed verifier.
///
/// Immutable once handed to [`crate::GoogleVerifier`].
#[derive(Clone, Deserialize)]
pub struct VerifierConfig {
    /// The reCAPTCHA v3 secret key. Required.
    #[serde(default)]
    pub secret: String,

    /// Expected action, e.g. "login" or "contact". Empty skips the check.
    #[serde(default)]
    pub expected_action: String,

    /// Lowest acceptable score, in [0, 1]
    #[serde(default = "default_min_score")]
    pub min_score: f64,

    /// Verification endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-request timeout of the default HTTP transport (0 means unset)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Retry behaviour on transport failures and 5xx responses
    #[serde(default)]
    pub retry: RetryPolicy,
}

// Default value functions
fn default_min_score() -> f64 { DEFAULT_MIN_SCORE }
fn default_endpoint() -> String { SITEVERIFY_URL.to_string() }
fn default_timeout_secs() -> u64 { DEFAULT_TIMEOUT_SECS }

impl VerifierConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.expected_action = action.into();
        self
    }

    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Transport timeout; an unset (zero) value falls back to the default
    pub fn timeout(&self) -> Duration {
        match self.timeout_secs {
            0 => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            secs => Duration::from_secs(secs),
        }
    }

    /// Reject configurations a verifier cannot be built from
    pub fn validate(&self) -> Result<(), RecaptchaError> {
        if self.secret.trim().is_empty() {
            return Err(RecaptchaError::Config(
                "recaptcha secret is required".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.min_score) {
            return Err(RecaptchaError::Config(format!(
                "min_score must be within [0, 1], got {}",
                self.min_score
            )));
        }
        if self.endpoint.is_empty() {
            return Err(RecaptchaError::Config("endpoint must not be empty".to_string()));
        }
        Ok(())
    }
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            expected_action: String::new(),
            min_score: default_min_score(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            retry: RetryPolicy::default(),
        }
    }
}

impl fmt::Debug for VerifierConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerifierConfig")
            .field("secret", &"<redacted>")
            .field("expected_action", &self.expected_action)
            .field("min_score", &self.min_score)
            .field("endpoint", &self.endpoint)
            .field("timeout_secs", &self.timeout_secs)
            .field("retry", &self.retry)
            .finish()
    }
}

/// Application configuration for the `siteverify` tool
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Verifier settings (`[recaptcha]` table)
    #[serde(default)]
    pub recaptcha: VerifierConfig,
}

impl AppConfig {
    /// Load configuration from file, falling back to defaults when absent
    pub fn load(config_path: &str) -> Result<Self> {
        if !Path::new(config_path).exists() {
            tracing::warn!(path = %config_path, "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path))
            .build()
            .context("Failed to load config file")?;

        settings
            .try_deserialize()
            .context("Failed to parse config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = VerifierConfig::new("abc");
        assert_eq!(cfg.min_score, 0.5);
        assert_eq!(cfg.endpoint, SITEVERIFY_URL);
        assert_eq!(cfg.timeout(), Duration::from_secs(5));
        assert!(cfg.expected_action.is_empty());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_uses_default() {
        let cfg = VerifierConfig {
            timeout_secs: 0,
            ..VerifierConfig::new("abc")
        };
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        let cfg = VerifierConfig {
            timeout_secs: 12,
            ..VerifierConfig::new("abc")
        };
        assert_eq!(cfg.timeout(), Duration::from_secs(12));
    }

    #[test]
    fn test_empty_secret_rejected() {
        let err = VerifierConfig::new("").validate().unwrap_err();
        assert!(matches!(err, RecaptchaError::Config(_)));

        let err = VerifierConfig::new("   ").validate().unwrap_err();
        assert!(matches!(err, RecaptchaError::Config(_)));
    }

    #[test]
    fn test_min_score_range() {
        assert!(VerifierConfig::new("abc").with_min_score(0.0).validate().is_ok());
        assert!(VerifierConfig::new("abc").with_min_score(1.0).validate().is_ok());
        assert!(VerifierConfig::new("abc").with_min_score(1.5).validate().is_err());
        assert!(VerifierConfig::new("abc").with_min_score(-0.1).validate().is_err());
        assert!(VerifierConfig::new("abc").with_min_score(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let cfg = VerifierConfig::new("super-secret-key");
        assert!(!format!("{:?}", cfg).contains("super-secret-key"));
    }

    #[test]
    fn test_deserialize_toml_table() {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(
                r#"
                [recaptcha]
                secret = "abc"
                expected_action = "contact"
                min_score = 0.7

                [recaptcha.retry]
                max_attempts = 5
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();

        let cfg: AppConfig = settings.try_deserialize().unwrap();
        assert_eq!(cfg.recaptcha.secret, "abc");
        assert_eq!(cfg.recaptcha.expected_action, "contact");
        assert_eq!(cfg.recaptcha.min_score, 0.7);
        assert_eq!(cfg.recaptcha.retry.max_attempts, 5);
        assert_eq!(cfg.recaptcha.retry.base_wait_ms, 2_000);
        assert_eq!(cfg.recaptcha.endpoint, SITEVERIFY_URL);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let cfg = AppConfig::load("does/not/exist.toml").unwrap();
        assert!(cfg.recaptcha.secret.is_empty());
    }
}
