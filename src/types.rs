//! Common types used throughout the rating engine and practice service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for users
pub type UserId = Uuid;

/// Unique identifier for practice problems
pub type ProblemId = Uuid;

/// Identifier of a topic (a node of the DSA roadmap, e.g. "two-pointers")
pub type TopicId = String;

/// Skill or difficulty estimate on the open logistic Elo scale
pub type Rating = f64;

/// Topic used when a submission does not name one
pub const DEFAULT_TOPIC: &str = "general";

/// Result of a user attempting a problem, from the user's side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    pub fn from_passed(passed: bool) -> Self {
        if passed {
            Outcome::Success
        } else {
            Outcome::Failure
        }
    }

    /// Actual score fed into the rating update (1.0 or 0.0)
    pub fn score(self) -> f64 {
        match self {
            Outcome::Success => 1.0,
            Outcome::Failure => 0.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::Failure => "failure",
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single historical attempt, as consumed by the topic aggregation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    pub topic_id: TopicId,
    /// Zero means failure, anything above zero counts as a success
    pub outcome_score: f64,
}

impl Attempt {
    pub fn new(topic_id: impl Into<TopicId>, outcome_score: f64) -> Self {
        Self {
            topic_id: topic_id.into(),
            outcome_score,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome_score > 0.0
    }
}

/// Best-performing topic over an attempt history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrongestTopic {
    pub topic_id: TopicId,
    pub total_attempts: u64,
    pub successful_attempts: u64,
    /// Percentage in 0..=100
    pub success_rate: f64,
}

/// Stored attempt with the submission context it came from
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptRecord {
    pub user_id: UserId,
    pub problem_id: ProblemId,
    #[serde(flatten)]
    pub attempt: Attempt,
    pub passed: bool,
    pub old_rating: i64,
    pub new_rating: i64,
    pub problem_rating: i64,
    pub recorded_at: DateTime<Utc>,
}

/// HTTP Message Types
/// Solution submitted from the problem workspace
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitSolutionRequest {
    pub user_id: UserId,
    pub problem_id: ProblemId,
    pub code: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub topic_id: Option<TopicId>,
}

/// What the workspace is told after a submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionOutcome {
    pub passed: bool,
    pub new_rating: i64,
    pub rating_change: i64,
    pub problem_rating: i64,
}

/// Aggregated view of a user's progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub user_id: UserId,
    pub rating: i64,
    pub total_attempts: u64,
    pub successful_attempts: u64,
    pub readiness_score: f64,
    pub strongest_topic: Option<StrongestTopic>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_scores() {
        assert_eq!(Outcome::Success.score(), 1.0);
        assert_eq!(Outcome::Failure.score(), 0.0);
        assert_eq!(Outcome::from_passed(false), Outcome::Failure);
    }

    #[test]
    fn test_attempt_success_threshold() {
        assert!(Attempt::new("graphs", 1.0).is_success());
        assert!(Attempt::new("graphs", 0.25).is_success());
        assert!(!Attempt::new("graphs", 0.0).is_success());
    }

    #[test]
    fn test_submit_request_defaults() {
        let body = serde_json::json!({
            "userId": "6f1c2d1e-8a9b-4c3d-9e8f-7a6b5c4d3e2f",
            "problemId": "0b1c2d3e-4f5a-4b6c-8d7e-9f0a1b2c3d4e",
            "code": "function solve() { return 0; }"
        });

        let request: SubmitSolutionRequest = serde_json::from_value(body).unwrap();
        assert!(request.language.is_none());
        assert!(request.topic_id.is_none());
    }

    #[test]
    fn test_attempt_record_flattens_attempt() {
        let record = AttemptRecord {
            user_id: Uuid::new_v4(),
            problem_id: Uuid::new_v4(),
            attempt: Attempt::new("heaps", 1.0),
            passed: true,
            old_rating: 1200,
            new_rating: 1217,
            problem_rating: 1233,
            recorded_at: Utc::now(),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["topicId"], "heaps");
        assert_eq!(value["outcomeScore"], 1.0);
    }
}
