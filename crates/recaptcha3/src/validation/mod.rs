//! Named-rule field validation.
//!
//! A [`Validator`] holds rules keyed by name. Types opt in through
//! [`Validate`], listing each field with a comma-separated rule list, e.g.
//! `"required,recaptcha"`. Rules only ever answer pass/fail.

mod rule;

pub use rule::register_recaptcha;

use futures::FutureExt;
use futures::future::{self, BoxFuture};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Name of the built-in non-empty check
pub const REQUIRED: &str = "required";

/// A validation rule: field value in, verdict out
pub type Rule = Arc<dyn Fn(String) -> BoxFuture<'static, bool> + Send + Sync>;

/// Anything rules can be registered with
pub trait RuleRegistry {
    fn register_rule(&mut self, name: &str, rule: Rule) -> Result<(), ValidationError>;
}

/// One field under validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field<'a> {
    pub name: &'a str,
    pub value: &'a str,
    /// Comma-separated rule names, applied in order
    pub rules: &'a str,
}

impl<'a> Field<'a> {
    pub fn new(name: &'a str, value: &'a str, rules: &'a str) -> Self {
        Self { name, value, rules }
    }
}

/// Types whose fields can be validated
pub trait Validate {
    fn fields(&self) -> Vec<Field<'_>>;
}

/// A field that failed one of its rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub rule: String,
}

/// All failed fields of one validation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(pub Vec<FieldError>);

impl FieldErrors {
    pub fn contains(&self, field: &str, rule: &str) -> bool {
        self.0.iter().any(|e| e.field == field && e.rule == rule)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "field '{}' failed on the '{}' rule", e.field, e.rule)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A rule with this name already exists
    #[error("Validation rule already registered: {0}")]
    DuplicateRule(String),

    /// Rule names must be non-empty, without commas or whitespace
    #[error("Invalid validation rule name: {0:?}")]
    InvalidRuleName(String),

    /// A field references a rule nobody registered
    #[error("Unknown validation rule '{rule}' on field '{field}'")]
    UnknownRule { field: String, rule: String },

    #[error("Validation failed: {0}")]
    Failed(FieldErrors),
}

/// Rule registry and runner
pub struct Validator {
    rules: HashMap<String, Rule>,
}

impl Validator {
    /// Validator with the built-in `required` rule
    pub fn new() -> Self {
        let mut rules: HashMap<String, Rule> = HashMap::new();
        rules.insert(
            REQUIRED.to_string(),
            Arc::new(|value: String| future::ready(!value.is_empty()).boxed()),
        );
        Self { rules }
    }

    pub fn has_rule(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Run every field's rules; a field stops at its first failing rule.
    pub async fn validate<T: Validate + ?Sized>(&self, target: &T) -> Result<(), ValidationError> {
        let mut failures = Vec::new();

        for field in target.fields() {
            for name in field.rules.split(',').map(str::trim).filter(|r| !r.is_empty()) {
                let rule = self.rules.get(name).ok_or_else(|| ValidationError::UnknownRule {
                    field: field.name.to_string(),
                    rule: name.to_string(),
                })?;

                if !rule(field.value.to_string()).await {
                    tracing::debug!(field = %field.name, rule = %name, "Field validation failed");
                    failures.push(FieldError {
                        field: field.name.to_string(),
                        rule: name.to_string(),
                    });
                    break;
                }
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::Failed(FieldErrors(failures)))
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleRegistry for Validator {
    fn register_rule(&mut self, name: &str, rule: Rule) -> Result<(), ValidationError> {
        if name.is_empty() || name.contains(',') || name.chars().any(char::is_whitespace) {
            return Err(ValidationError::InvalidRuleName(name.to_string()));
        }
        if self.rules.contains_key(name) {
            return Err(ValidationError::DuplicateRule(name.to_string()));
        }
        self.rules.insert(name.to_string(), rule);
        Ok(())
    }
}
