//! Submission handling
//!
//! Ties evaluation, the rating calculator and both stores together: a
//! submission is validated once, judged, and turned into new user and
//! problem ratings plus one attempt record.

use crate::error::{ArenaError, Result};
use crate::metrics::MetricsCollector;
use crate::rating::{RatedEntity, RatingCalculator, RatingEntry, RatingStorage};
use crate::stats::{readiness_score, strongest_topic};
use crate::submission::attempts::AttemptStorage;
use crate::submission::boilerplate::Language;
use crate::submission::evaluator::evaluate_submission;
use crate::types::{
    Attempt, AttemptRecord, DashboardSummary, Outcome, SubmissionOutcome, SubmitSolutionRequest,
    UserId, DEFAULT_TOPIC,
};
use crate::utils::current_timestamp;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Processes submissions and builds dashboard summaries
pub struct SubmissionService {
    calculator: Arc<dyn RatingCalculator>,
    ratings: Arc<dyn RatingStorage>,
    attempts: Arc<dyn AttemptStorage>,
    metrics: Option<Arc<MetricsCollector>>,
}

impl SubmissionService {
    pub fn new(
        calculator: Arc<dyn RatingCalculator>,
        ratings: Arc<dyn RatingStorage>,
        attempts: Arc<dyn AttemptStorage>,
    ) -> Self {
        Self {
            calculator,
            ratings,
            attempts,
            metrics: None,
        }
    }

    /// Record submission metrics into `metrics`
    pub fn with_metrics(mut self, metrics: Arc<MetricsCollector>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Configuration of the rating calculator in use
    pub fn calculator_config(&self) -> serde_json::Value {
        self.calculator.config()
    }

    pub fn rating_storage(&self) -> Arc<dyn RatingStorage> {
        self.ratings.clone()
    }

    pub fn attempt_storage(&self) -> Arc<dyn AttemptStorage> {
        self.attempts.clone()
    }

    /// Stored entry for `entity`, or a fresh one at the initial rating
    pub fn rating_entry(&self, entity: RatedEntity) -> Result<RatingEntry> {
        if let Some(entry) = self.ratings.get_rating(&entity)? {
            return Ok(entry);
        }

        let initial = match entity {
            RatedEntity::User(_) => self.calculator.initial_user_rating(),
            RatedEntity::Problem(_) => self.calculator.initial_problem_rating(),
        };

        debug!("No rating stored for {}, using {}", entity, initial);
        Ok(RatingEntry::new(entity, initial))
    }

    /// Judge a submission and apply the resulting rating update
    pub fn submit(&self, request: SubmitSolutionRequest) -> Result<SubmissionOutcome> {
        let topic_id = match self.validate(&request) {
            Ok(topic_id) => topic_id,
            Err(e) => {
                warn!(
                    "Rejected submission - user: {}, problem: {}, error: {}",
                    request.user_id, request.problem_id, e
                );
                if let Some(metrics) = &self.metrics {
                    metrics.record_rejected_submission();
                }
                return Err(e.into());
            }
        };

        let passed = evaluate_submission(&request.code).passed();
        let outcome = Outcome::from_passed(passed);

        let mut user_entry = self.rating_entry(RatedEntity::User(request.user_id))?;
        let mut problem_entry = self.rating_entry(RatedEntity::Problem(request.problem_id))?;
        let old_user_rating = user_entry.rating;

        let start_time = std::time::Instant::now();
        let update =
            self.calculator
                .calculate_update(user_entry.rating, problem_entry.rating, outcome)?;
        let calculation_time = start_time.elapsed();

        let rating_change = update.user_change(old_user_rating);

        // The attempt goes first so a failed append leaves both ratings untouched
        self.attempts.record_attempt(AttemptRecord {
            user_id: request.user_id,
            problem_id: request.problem_id,
            attempt: Attempt::new(topic_id.clone(), outcome.score()),
            passed,
            old_rating: old_user_rating.round() as i64,
            new_rating: update.new_user_rating,
            problem_rating: update.new_problem_rating,
            recorded_at: current_timestamp(),
        })?;

        user_entry.update_rating(update.new_user_rating as f64);
        problem_entry.update_rating(update.new_problem_rating as f64);
        self.ratings.store_ratings(vec![user_entry, problem_entry])?;

        if let Some(metrics) = &self.metrics {
            metrics.record_submission(passed);
            metrics.record_rating_update(outcome, rating_change, calculation_time);
        }

        info!(
            "Submission processed - user: {}, problem: {}, topic: '{}', passed: {}, rating: {} -> {} ({:+}), problem rating: {}",
            request.user_id,
            request.problem_id,
            topic_id,
            passed,
            old_user_rating,
            update.new_user_rating,
            rating_change,
            update.new_problem_rating
        );

        Ok(SubmissionOutcome {
            passed,
            new_rating: update.new_user_rating,
            rating_change,
            problem_rating: update.new_problem_rating,
        })
    }

    /// Rating, readiness and strongest topic for one user
    pub fn dashboard(&self, user_id: &UserId) -> Result<DashboardSummary> {
        let records = self.attempts.attempts_for_user(user_id)?;
        let user_entry = self.rating_entry(RatedEntity::User(*user_id))?;

        let total_attempts = records.len() as u64;
        let successful_attempts = records
            .iter()
            .filter(|record| record.attempt.is_success())
            .count() as u64;

        let readiness = readiness_score(successful_attempts as f64, total_attempts as f64)
            .map_err(ArenaError::from)?;
        let strongest = strongest_topic(records.iter().map(|record| &record.attempt));

        Ok(DashboardSummary {
            user_id: *user_id,
            rating: user_entry.rating.round() as i64,
            total_attempts,
            successful_attempts,
            readiness_score: readiness,
            strongest_topic: strongest,
        })
    }

    fn validate(&self, request: &SubmitSolutionRequest) -> std::result::Result<String, ArenaError> {
        if request.code.trim().is_empty() {
            return Err(ArenaError::InvalidSubmission {
                reason: "code must not be empty".to_string(),
            });
        }

        if let Some(language) = &request.language {
            language.parse::<Language>()?;
        }

        let topic_id = request
            .topic_id
            .as_deref()
            .map(str::trim)
            .filter(|topic| !topic.is_empty())
            .unwrap_or(DEFAULT_TOPIC)
            .to_string();

        Ok(topic_id)
    }
}
