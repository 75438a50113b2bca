//! Readiness score: the success percentage across a user's attempts

use crate::error::RatingError;

/// Percentage of successful attempts, always within `0.0..=100.0`
///
/// Returns 0 when there are no attempts. Fails with
/// [`RatingError::InvalidArgument`] when either count is non-finite or
/// negative.
pub fn readiness_score(successful_attempts: f64, total_attempts: f64) -> Result<f64, RatingError> {
    if !successful_attempts.is_finite() || !total_attempts.is_finite() {
        return Err(RatingError::invalid_argument(
            "attempt counts must be finite numbers",
        ));
    }
    if successful_attempts < 0.0 || total_attempts < 0.0 {
        return Err(RatingError::invalid_argument(
            "attempt counts cannot be negative",
        ));
    }
    if total_attempts == 0.0 {
        return Ok(0.0);
    }

    let raw = successful_attempts / total_attempts * 100.0;
    if !raw.is_finite() {
        return Ok(0.0);
    }

    Ok(raw.clamp(0.0, 100.0))
}
