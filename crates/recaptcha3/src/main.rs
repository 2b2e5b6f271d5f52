//! # siteverify - reCAPTCHA v3 token check
//!
//! Verifies one token against the configured secret and policy, prints the
//! evaluation as JSON, and exits 0 only when the token passes.
//!
//! ```text
//! siteverify --secret $KEY --action contact --min-score 0.5 <token>
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use recaptcha3::{AppConfig, GoogleVerifier, RecaptchaError};

/// Verify a reCAPTCHA v3 token
#[derive(Parser, Debug)]
#[command(name = "siteverify")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Token produced by grecaptcha.execute on the client
    token: String,

    /// Configuration file path
    #[arg(short, long, default_value = "config/recaptcha3.toml")]
    config: String,

    /// Secret key (overrides config)
    #[arg(long, env = "RECAPTCHA3_SECRET_KEY", hide_env_values = true)]
    secret: Option<String>,

    /// Expected action (overrides config)
    #[arg(short, long)]
    action: Option<String>,

    /// Minimum acceptable score (overrides config)
    #[arg(long)]
    min_score: Option<f64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", env = "LOG_LEVEL")]
    log_level: String,

    /// Enable JSON logging output
    #[arg(long, default_value = "false")]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // A missing .env is fine
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_logging(&args.log_level, args.json_logs)?;

    let mut config = AppConfig::load(&args.config)?;
    apply_overrides(&mut config, &args);

    let verifier = GoogleVerifier::new(config.recaptcha).context("Invalid verifier configuration")?;
    info!(
        action = %verifier.expected_action(),
        min_score = verifier.min_score(),
        "Verifying token"
    );

    let (passed, report) = match verifier.evaluate(&args.token).await {
        Ok(evaluation) => (evaluation.outcome.passed, serde_json::to_value(&evaluation)?),
        Err(err) => (false, error_json(&err)),
    };

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn apply_overrides(config: &mut AppConfig, args: &Args) {
    if let Some(ref secret) = args.secret {
        config.recaptcha.secret = secret.clone();
    }
    if let Some(ref action) = args.action {
        config.recaptcha.expected_action = action.clone();
    }
    if let Some(min_score) = args.min_score {
        config.recaptcha.min_score = min_score;
    }
}

fn error_json(err: &RecaptchaError) -> serde_json::Value {
    serde_json::json!({
        "outcome": { "passed": false },
        "error": {
            "kind": err.kind(),
            "message": err.to_string(),
        }
    })
}

/// Initialize structured logging with tracing
fn init_logging(level: &str, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}
