//! # recaptcha3
//!
//! reCAPTCHA v3 token verification, pluggable into field validation as a
//! named rule.
//!
//! ## Architecture
//! ```text
//! Validator ──rule──▶ Verifier ──▶ send_with_retry ──▶ Transport ──▶ siteverify
//!                        │                                              │
//!                        └────────── policy::decide ◀── JSON body ◀─────┘
//! ```
//!
//! ## Modules
//! - `verifier` - The `Verifier` trait, Google and mock implementations, pass/fail policy
//! - `transport` - HTTP transport and bounded retry with backoff
//! - `validation` - Named-rule field validator and the reCAPTCHA rule adapter
//! - `config` - Verifier and application configuration

pub mod config;
pub mod transport;
pub mod validation;
pub mod verifier;

pub use config::{AppConfig, VerifierConfig};
pub use transport::{HttpTransport, RetryPolicy, Transport, TransportResponse};
pub use validation::{
    Field, RuleRegistry, Validate, ValidationError, Validator, register_recaptcha,
};
pub use verifier::{Evaluation, GoogleVerifier, MockVerifier, Verifier, policy, verdict};

pub use recaptcha_common::{Outcome, RecaptchaError, Rejection, SiteVerifyResponse};
