//! Core types shared across reCAPTCHA components.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::params;

/// Outbound siteverify parameters.
///
/// `Debug` redacts both values; neither should ever reach a log line.
#[derive(Clone, PartialEq, Eq)]
pub struct SiteVerifyRequest {
    pub secret: String,
    pub response: String,
}

impl SiteVerifyRequest {
    pub fn new(secret: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            response: response.into(),
        }
    }

    /// Form fields in the order they are sent
    pub fn form(&self) -> [(&'static str, &str); 2] {
        [
            (params::SECRET, self.secret.as_str()),
            (params::RESPONSE, self.response.as_str()),
        ]
    }
}

impl fmt::Debug for SiteVerifyRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SiteVerifyRequest")
            .field("secret", &"<redacted>")
            .field("response_len", &self.response.len())
            .finish()
    }
}

/// Decoded siteverify response body
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteVerifyResponse {
    /// Whether the token was valid for this site
    pub success: bool,

    /// Likelihood the interaction was human (1.0) or a bot (0.0)
    #[serde(default)]
    pub score: f64,

    /// Action name the token was issued for
    #[serde(default)]
    pub action: String,

    /// Hostname of the site where the challenge was solved
    #[serde(default)]
    pub hostname: String,

    /// Challenge load time (ISO-8601)
    #[serde(default)]
    pub challenge_ts: String,

    #[serde(default, rename = "error-codes")]
    pub error_codes: Vec<String>,
}

impl SiteVerifyResponse {
    /// Challenge timestamp, if present and well-formed
    pub fn challenge_time(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.challenge_ts)
            .ok()
            .map(|ts| ts.with_timezone(&Utc))
    }
}

/// Why a well-formed response was rejected
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    /// The service reported `success: false`
    Unsuccessful { error_codes: Vec<String> },
    /// Score strictly below the configured threshold
    LowScore { score: f64, min_score: f64 },
    /// Token issued for a different action
    ActionMismatch { expected: String, actual: String },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsuccessful { error_codes } if error_codes.is_empty() => {
                write!(f, "verification failed")
            }
            Self::Unsuccessful { error_codes } => {
                write!(f, "verification failed: [{}]", error_codes.join(", "))
            }
            Self::LowScore { score, min_score } => {
                write!(f, "low score: {score:.2} < {min_score:.2}")
            }
            Self::ActionMismatch { expected, actual } => {
                write!(f, "unexpected action: expected {expected:?}, got {actual:?}")
            }
        }
    }
}

/// Result of applying the pass/fail policy to a response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<Rejection>,
}

impl Outcome {
    pub fn pass() -> Self {
        Self {
            passed: true,
            reason: None,
        }
    }

    pub fn reject(reason: Rejection) -> Self {
        Self {
            passed: false,
            reason: Some(reason),
        }
    }
}
