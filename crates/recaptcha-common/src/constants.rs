//! Shared constants for reCAPTCHA components.

/// Google's token verification endpoint
pub const SITEVERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

/// Default transport request timeout (5 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Default minimum acceptable score
pub const DEFAULT_MIN_SCORE: f64 = 0.5;

/// Total attempts per verification, first try included
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Wait before the first retry (2 seconds)
pub const DEFAULT_BASE_WAIT_MS: u64 = 2_000;

/// Upper bound on any single retry wait (8 seconds)
pub const DEFAULT_MAX_WAIT_MS: u64 = 8_000;

/// Rule name conventionally used when registering with a validator
pub const DEFAULT_RULE_NAME: &str = "recaptcha";

/// Form parameter names of the siteverify call
pub mod params {
    /// Shared secret between the site and reCAPTCHA
    pub const SECRET: &str = "secret";

    /// The user response token provided by the client
    pub const RESPONSE: &str = "response";
}
