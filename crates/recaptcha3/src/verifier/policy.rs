//! Pass/fail decision over a decoded siteverify response.

use recaptcha_common::{Outcome, Rejection, SiteVerifyResponse};

/// Decide whether `resp` is acceptable.
///
/// Checks run in order (success flag, score, action) and the first failure
/// wins. A score equal to `min_score` passes; a NaN threshold rejects every
/// score. An empty `expected_action` disables the action check; otherwise it
/// must match exactly.
pub fn decide(resp: &SiteVerifyResponse, min_score: f64, expected_action: &str) -> Outcome {
    if !resp.success {
        return Outcome::reject(Rejection::Unsuccessful {
            error_codes: resp.error_codes.clone(),
        });
    }

    if min_score.is_nan() || resp.score < min_score {
        return Outcome::reject(Rejection::LowScore {
            score: resp.score,
            min_score,
        });
    }

    if !expected_action.is_empty() && resp.action != expected_action {
        return Outcome::reject(Rejection::ActionMismatch {
            expected: expected_action.to_string(),
            actual: resp.action.clone(),
        });
    }

    Outcome::pass()
}
