//! # reCAPTCHA Common
//!
//! Shared types and utilities used across the reCAPTCHA v3 crates.
//!
//! ## Modules
//! - `types` - Wire format of the siteverify call and policy outcomes
//! - `error` - Common error taxonomy
//! - `constants` - Endpoint, defaults, and parameter names

pub mod constants;
pub mod error;
pub mod types;

pub use error::RecaptchaError;
pub use types::*;
