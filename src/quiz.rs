//! Topic quiz grading
//!
//! A topic's problem workspace unlocks once the user answers enough of the
//! prerequisite quiz correctly (four of five by default).

use crate::error::ArenaError;
use serde::{Deserialize, Serialize};

/// Correct answers needed to unlock a topic unless configured otherwise
pub const DEFAULT_PASS_THRESHOLD: usize = 4;

/// Outcome of grading one quiz
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub score: usize,
    pub total_questions: usize,
    pub pass_threshold: usize,
    pub passed: bool,
    /// Indices of the questions answered incorrectly
    pub incorrect_questions: Vec<usize>,
}

/// Grade submitted option indices against the answer key
pub fn grade_quiz(
    answers: &[usize],
    answer_key: &[usize],
    pass_threshold: usize,
) -> Result<QuizResult, ArenaError> {
    if answer_key.is_empty() {
        return Err(invalid_quiz("quiz has no questions".to_string()));
    }
    if answers.len() != answer_key.len() {
        return Err(invalid_quiz(format!(
            "expected {} answers, got {}",
            answer_key.len(),
            answers.len()
        )));
    }
    if pass_threshold == 0 || pass_threshold > answer_key.len() {
        return Err(invalid_quiz(format!(
            "pass threshold {} is outside 1..={}",
            pass_threshold,
            answer_key.len()
        )));
    }

    let incorrect_questions: Vec<usize> = answers
        .iter()
        .zip(answer_key)
        .enumerate()
        .filter(|(_, (given, expected))| given != expected)
        .map(|(question, _)| question)
        .collect();

    let score = answer_key.len() - incorrect_questions.len();

    Ok(QuizResult {
        score,
        total_questions: answer_key.len(),
        pass_threshold,
        passed: score >= pass_threshold,
        incorrect_questions,
    })
}

fn invalid_quiz(reason: String) -> ArenaError {
    ArenaError::InvalidRequest { reason }
}
