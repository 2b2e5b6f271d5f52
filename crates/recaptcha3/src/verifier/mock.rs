//! Canned verifier for tests.

use async_trait::async_trait;
use recaptcha_common::RecaptchaError;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::Verifier;

/// Verifier returning a preconfigured verdict, ignoring the token.
///
/// A configured error always wins over `should_pass`.
#[derive(Debug, Default)]
pub struct MockVerifier {
    pub should_pass: bool,
    pub error: Option<RecaptchaError>,
    calls: AtomicUsize,
}

impl MockVerifier {
    pub fn new(should_pass: bool, error: Option<RecaptchaError>) -> Self {
        Self {
            should_pass,
            error,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn passing() -> Self {
        Self::new(true, None)
    }

    pub fn failing() -> Self {
        Self::new(false, None)
    }

    pub fn erroring(error: RecaptchaError) -> Self {
        Self::new(false, Some(error))
    }

    /// Number of `verify` calls so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Verifier for MockVerifier {
    async fn verify(&self, _token: &str) -> Result<bool, RecaptchaError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(self.should_pass),
        }
    }
}
