//! Rating calculator trait and implementations
//!
//! This module defines the interface the submission flow uses to turn an
//! outcome into new user and problem ratings, plus a no-op implementation.

use crate::types::{Outcome, Rating};
use serde::{Deserialize, Serialize};

/// Ratings after a single user-versus-problem event, rounded for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingUpdate {
    pub new_user_rating: i64,
    pub new_problem_rating: i64,
}

impl RatingUpdate {
    /// Change of the user's reported rating relative to `old_user_rating`
    pub fn user_change(&self, old_user_rating: Rating) -> i64 {
        self.new_user_rating - old_user_rating.round() as i64
    }

    /// Change of the problem's reported rating relative to `old_problem_rating`
    pub fn problem_change(&self, old_problem_rating: Rating) -> i64 {
        self.new_problem_rating - old_problem_rating.round() as i64
    }
}

/// Trait for calculating rating changes after a submission
pub trait RatingCalculator: Send + Sync {
    /// Calculate new ratings for a user and the problem they attempted
    ///
    /// # Arguments
    /// * `user_rating` - Current rating of the user
    /// * `problem_rating` - Current difficulty rating of the problem
    /// * `outcome` - Result from the user's side
    fn calculate_update(
        &self,
        user_rating: Rating,
        problem_rating: Rating,
        outcome: Outcome,
    ) -> crate::error::Result<RatingUpdate>;

    /// Rating assigned to users without history
    fn initial_user_rating(&self) -> Rating;

    /// Rating assigned to problems without history
    fn initial_problem_rating(&self) -> Rating;

    /// Current configuration as JSON, reported on the service root
    fn config(&self) -> serde_json::Value;
}

/// Calculator that never moves ratings, for testing or fallback
#[derive(Debug, Clone)]
pub struct NoOpRatingCalculator {
    initial_user_rating: Rating,
    initial_problem_rating: Rating,
}

impl NoOpRatingCalculator {
    pub fn new(initial_user_rating: Rating, initial_problem_rating: Rating) -> Self {
        Self {
            initial_user_rating,
            initial_problem_rating,
        }
    }
}

impl Default for NoOpRatingCalculator {
    fn default() -> Self {
        Self::new(1200.0, 1250.0)
    }
}

impl RatingCalculator for NoOpRatingCalculator {
    fn calculate_update(
        &self,
        user_rating: Rating,
        problem_rating: Rating,
        _outcome: Outcome,
    ) -> crate::error::Result<RatingUpdate> {
        Ok(RatingUpdate {
            new_user_rating: user_rating.round() as i64,
            new_problem_rating: problem_rating.round() as i64,
        })
    }

    fn initial_user_rating(&self) -> Rating {
        self.initial_user_rating
    }

    fn initial_problem_rating(&self) -> Rating {
        self.initial_problem_rating
    }

    fn config(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "no_op",
            "initial_user_rating": self.initial_user_rating,
            "initial_problem_rating": self.initial_problem_rating
        })
    }
}
