//! Token verification.
//!
//! [`Verifier`] is the single capability the rest of the crate depends on.
//! [`GoogleVerifier`] calls the siteverify endpoint; [`MockVerifier`] returns
//! a canned verdict for tests.

mod google;
mod mock;
pub mod policy;

pub use google::{Evaluation, GoogleVerifier};
pub use mock::MockVerifier;

use async_trait::async_trait;
use recaptcha_common::RecaptchaError;

/// Verifies a reCAPTCHA token.
///
/// `Ok(accepted)` carries the verdict. `Err(_)` always means "not accepted";
/// the error is diagnostic detail only.
#[async_trait]
pub trait Verifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<bool, RecaptchaError>;
}

/// Collapse a verification result into the authoritative boolean
pub fn verdict(result: &Result<bool, RecaptchaError>) -> bool {
    matches!(result, Ok(true))
}
