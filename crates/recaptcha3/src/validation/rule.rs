//! Adapter exposing a [`Verifier`] as a validation rule.

use futures::FutureExt;
use std::sync::Arc;

use super::{Rule, RuleRegistry, ValidationError};
use crate::verifier::{Verifier, verdict};

/// Register `verifier` under `rule_name`.
///
/// The rule fails an empty value without calling the verifier. Verifier
/// errors are logged at `warn` and never reach the registry: it only sees
/// the boolean. Registration fails only if the registry rejects the name.
pub fn register_recaptcha<R: RuleRegistry + ?Sized>(
    registry: &mut R,
    rule_name: &str,
    verifier: Arc<dyn Verifier>,
) -> Result<(), ValidationError> {
    let name: Arc<str> = Arc::from(rule_name);

    let rule: Rule = Arc::new(move |token: String| {
        let verifier = Arc::clone(&verifier);
        let name = Arc::clone(&name);
        async move {
            if token.is_empty() {
                return false;
            }

            let result = verifier.verify(&token).await;
            if let Err(ref err) = result {
                tracing::warn!(
                    rule = %name,
                    kind = err.kind(),
                    error = %err,
                    "reCAPTCHA error"
                );
            }
            verdict(&result)
        }
        .boxed()
    });

    registry.register_rule(rule_name, rule)?;
    tracing::debug!(rule = %rule_name, "reCAPTCHA rule registered");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{Field, Validate, Validator};
    use crate::verifier::MockVerifier;
    use recaptcha_common::RecaptchaError;
    use std::io;
    use std::sync::Mutex;

    struct ContactForm {
        name: String,
        email: String,
        recaptcha_token: String,
    }

    impl ContactForm {
        fn with_token(token: &str) -> Self {
            Self {
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
                recaptcha_token: token.to_string(),
            }
        }
    }

    impl Validate for ContactForm {
        fn fields(&self) -> Vec<Field<'_>> {
            vec![
                Field::new("Name", &self.name, "required"),
                Field::new("Email", &self.email, "required"),
                Field::new("RecaptchaToken", &self.recaptcha_token, "recaptcha"),
            ]
        }
    }

    fn validator_with(mock: Arc<MockVerifier>) -> Validator {
        let mut v = Validator::new();
        register_recaptcha(&mut v, "recaptcha", mock).unwrap();
        v
    }

    /// Log sink capturing formatted output
    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Capture {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    #[tokio::test]
    async fn test_empty_token_skips_verifier() {
        let mock = Arc::new(MockVerifier::passing());
        let v = validator_with(mock.clone());

        let result = v.validate(&ContactForm::with_token("")).await;
        match result {
            Err(ValidationError::Failed(errors)) => {
                assert!(errors.contains("RecaptchaToken", "recaptcha"))
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn test_passing_verifier() {
        let mock = Arc::new(MockVerifier::passing());
        let v = validator_with(mock.clone());

        assert!(v.validate(&ContactForm::with_token("mock-token")).await.is_ok());
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn test_failing_verifier_without_error() {
        let mock = Arc::new(MockVerifier::failing());
        let v = validator_with(mock);

        assert!(v.validate(&ContactForm::with_token("mock-token")).await.is_err());
    }

    #[tokio::test]
    async fn test_verifier_error_only_reaches_logs() {
        let capture = Capture::default();
        let sink = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || sink.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let mock = Arc::new(MockVerifier::erroring(RecaptchaError::Mock("boom".to_string())));
        let v = validator_with(mock.clone());

        let err = v
            .validate(&ContactForm::with_token("mock-token"))
            .await
            .unwrap_err();
        assert_eq!(mock.calls(), 1);

        // The framework only learns which rule failed
        let ValidationError::Failed(errors) = err else {
            panic!("expected field failure");
        };
        assert!(errors.contains("RecaptchaToken", "recaptcha"));
        assert!(!errors.to_string().contains("boom"));

        let logs = capture.contents();
        assert!(logs.contains("reCAPTCHA error"));
        assert!(logs.contains("Mock verifier error: boom"));
    }

    #[test]
    fn test_duplicate_registration_surfaces() {
        let mut v = Validator::new();
        register_recaptcha(&mut v, "recaptcha", Arc::new(MockVerifier::passing())).unwrap();

        let err = register_recaptcha(&mut v, "recaptcha", Arc::new(MockVerifier::passing()))
            .unwrap_err();
        assert_eq!(err, ValidationError::DuplicateRule("recaptcha".to_string()));
    }
}
