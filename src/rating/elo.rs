//! Elo rating system implementation
//!
//! Users and problems share one logistic rating scale. Every submission is a
//! single pairwise game: the user "wins" by solving the problem, and the
//! problem wins otherwise. Updated ratings are rounded to the nearest integer
//! (half away from zero) only when they are returned.

use crate::error::RatingError;
use crate::rating::calculator::{RatingCalculator, RatingUpdate};
use crate::types::{Outcome, Rating};
use serde::{Deserialize, Serialize};
use skillratings::elo::{EloConfig, EloRating};
use tracing::debug;

/// Maximum rating swing per event unless configured otherwise
pub const DEFAULT_K_FACTOR: f64 = 32.0;

/// Probability that the entity rated `rating_a` beats the one rated `rating_b`
///
/// `1 / (1 + 10^((rating_b - rating_a) / 400))`
pub fn expected_score(rating_a: Rating, rating_b: Rating) -> f64 {
    let (expected_a, _) = skillratings::elo::expected_score(
        &EloRating { rating: rating_a },
        &EloRating { rating: rating_b },
    );
    expected_a
}

/// Apply one user-versus-problem event to both ratings
///
/// `actual_score` is 1.0 when the user solved the problem and 0.0 otherwise;
/// the problem's actual score is always `1 - actual_score`. Other finite
/// scores are accepted and used as-is.
///
/// Fails with [`RatingError::InvalidInput`] on non-finite ratings or score, on
/// a k-factor that is negative or non-finite, and when a rounded result falls
/// outside the `i64` range. Results are never clamped. A k-factor of zero
/// leaves both ratings unchanged.
pub fn update_ratings(
    user_rating: Rating,
    problem_rating: Rating,
    actual_score: f64,
    k_factor: f64,
) -> Result<RatingUpdate, RatingError> {
    ensure_finite("user rating", user_rating)?;
    ensure_finite("problem rating", problem_rating)?;
    ensure_finite("actual score", actual_score)?;
    ensure_finite("k-factor", k_factor)?;
    if k_factor < 0.0 {
        return Err(RatingError::invalid_input(format!(
            "k-factor must not be negative, got {}",
            k_factor
        )));
    }

    let expected_user = expected_score(user_rating, problem_rating);
    let expected_problem = expected_score(problem_rating, user_rating);
    let actual_problem = 1.0 - actual_score;

    let new_user_rating = user_rating + k_factor * (actual_score - expected_user);
    let new_problem_rating = problem_rating + k_factor * (actual_problem - expected_problem);

    Ok(RatingUpdate {
        new_user_rating: round_rating("user rating", new_user_rating)?,
        new_problem_rating: round_rating("problem rating", new_problem_rating)?,
    })
}

/// [`update_ratings`] with the default k-factor of 32
pub fn update_ratings_default(
    user_rating: Rating,
    problem_rating: Rating,
    actual_score: f64,
) -> Result<RatingUpdate, RatingError> {
    update_ratings(user_rating, problem_rating, actual_score, DEFAULT_K_FACTOR)
}

pub(crate) fn ensure_finite(name: &str, value: f64) -> Result<(), RatingError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(RatingError::invalid_input(format!(
            "{} must be a finite number, got {}",
            name, value
        )))
    }
}

// 2^63, the first value past i64::MAX
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

fn round_rating(name: &str, value: f64) -> Result<i64, RatingError> {
    let rounded = value.round();
    if rounded >= -I64_LIMIT && rounded < I64_LIMIT {
        Ok(rounded as i64)
    } else {
        Err(RatingError::invalid_input(format!(
            "updated {} {} does not fit an integer rating",
            name, value
        )))
    }
}

/// Extended configuration for the Elo rating system
/// This wraps the skillratings EloConfig with the starting ratings of both populations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtendedEloConfig {
    /// Core Elo parameters (the k-factor)
    pub elo_config: EloConfig,
    /// Rating given to users without history
    pub initial_user_rating: f64,
    /// Rating given to problems without history
    pub initial_problem_rating: f64,
}

impl Default for ExtendedEloConfig {
    fn default() -> Self {
        Self {
            elo_config: EloConfig {
                k: DEFAULT_K_FACTOR,
            },
            initial_user_rating: 1200.0,
            initial_problem_rating: 1250.0,
        }
    }
}

impl ExtendedEloConfig {
    pub fn with_k_factor(k_factor: f64) -> Self {
        Self {
            elo_config: EloConfig { k: k_factor },
            ..Self::default()
        }
    }

    pub fn k_factor(&self) -> f64 {
        self.elo_config.k
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        if !self.elo_config.k.is_finite() || self.elo_config.k < 0.0 {
            return Err(crate::error::ArenaError::ConfigurationError {
                message: "K-factor must be a finite, non-negative number".to_string(),
            }
            .into());
        }

        if !self.initial_user_rating.is_finite() {
            return Err(crate::error::ArenaError::ConfigurationError {
                message: "Initial user rating must be finite".to_string(),
            }
            .into());
        }

        if !self.initial_problem_rating.is_finite() {
            return Err(crate::error::ArenaError::ConfigurationError {
                message: "Initial problem rating must be finite".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Elo rating calculator implementation
#[derive(Debug)]
pub struct EloRatingCalculator {
    config: ExtendedEloConfig,
}

impl EloRatingCalculator {
    /// Create a new Elo rating calculator
    pub fn new(config: ExtendedEloConfig) -> crate::error::Result<Self> {
        config.validate()?;

        Ok(Self { config })
    }

    pub fn k_factor(&self) -> f64 {
        self.config.k_factor()
    }
}

impl RatingCalculator for EloRatingCalculator {
    fn calculate_update(
        &self,
        user_rating: Rating,
        problem_rating: Rating,
        outcome: Outcome,
    ) -> crate::error::Result<RatingUpdate> {
        let update = update_ratings(
            user_rating,
            problem_rating,
            outcome.score(),
            self.config.k_factor(),
        )?;

        debug!(
            "Elo update ({}): user {} -> {}, problem {} -> {}",
            outcome,
            user_rating,
            update.new_user_rating,
            problem_rating,
            update.new_problem_rating
        );

        Ok(update)
    }

    fn initial_user_rating(&self) -> Rating {
        self.config.initial_user_rating
    }

    fn initial_problem_rating(&self) -> Rating {
        self.config.initial_problem_rating
    }

    fn config(&self) -> serde_json::Value {
        serde_json::to_value(&self.config).unwrap_or(serde_json::Value::Null)
    }
}
