//! In-memory transports for tests.

use async_trait::async_trait;
use recaptcha_common::{RecaptchaError, SiteVerifyRequest};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use super::{Transport, TransportResponse};

type Step = Result<TransportResponse, RecaptchaError>;

/// Replays a fixed script of results, then keeps repeating the last one
pub(crate) struct ScriptedTransport {
    script: Mutex<VecDeque<Step>>,
    last: Mutex<Option<Step>>,
    calls: AtomicU32,
}

impl ScriptedTransport {
    pub(crate) fn new(script: Vec<Step>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(None),
            calls: AtomicU32::new(0),
        }
    }

    /// Always answers 200 with `body`
    pub(crate) fn ok(body: &str) -> Self {
        Self::new(vec![Ok(TransportResponse::new(200, body))])
    }

    pub(crate) fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, _request: &SiteVerifyRequest) -> Result<TransportResponse, RecaptchaError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().unwrap().pop_front();
        let mut last = self.last.lock().unwrap();
        match next {
            Some(step) => {
                *last = Some(step.clone());
                step
            }
            None => last
                .clone()
                .unwrap_or_else(|| Err(RecaptchaError::network("script exhausted"))),
        }
    }
}
