//! Common errors for reCAPTCHA verification.

use thiserror::Error;

use crate::types::Rejection;

/// Errors produced while verifying a token.
///
/// Every variant travels alongside a `false` verdict; none of them is ever
/// required to decide pass/fail.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecaptchaError {
    /// Invalid verifier configuration (missing secret, bad threshold)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The token was empty, nothing was sent
    #[error("Empty reCAPTCHA token")]
    EmptyToken,

    /// Network failure or unacceptable HTTP status
    #[error("Transport error: {message}")]
    Transport {
        /// HTTP status, when a response was received at all
        status: Option<u16>,
        message: String,
    },

    /// The response body was not a valid siteverify payload
    #[error("Decode error: {0}")]
    Decode(String),

    /// Well-formed response that failed the pass/fail policy
    #[error("reCAPTCHA rejected: {0}")]
    Rejected(Rejection),

    /// Error injected through a mock verifier
    #[error("Mock verifier error: {0}")]
    Mock(String),
}

impl RecaptchaError {
    /// Transport error without an HTTP response (connect, timeout, ...)
    pub fn network(message: impl Into<String>) -> Self {
        Self::Transport {
            status: None,
            message: message.into(),
        }
    }

    /// Transport error for an unexpected HTTP status
    pub fn status(status: u16) -> Self {
        Self::Transport {
            status: Some(status),
            message: format!("siteverify returned HTTP {status}"),
        }
    }

    /// Returns true if this error should be retried
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { status: None, .. } => true,
            Self::Transport { status: Some(code), .. } => *code >= 500,
            _ => false,
        }
    }

    /// Short label for structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::EmptyToken => "empty_token",
            Self::Transport { .. } => "transport",
            Self::Decode(_) => "decode",
            Self::Rejected(_) => "rejected",
            Self::Mock(_) => "mock",
        }
    }
}

impl From<serde_json::Error> for RecaptchaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
