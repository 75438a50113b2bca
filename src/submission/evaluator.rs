//! Submission evaluation
//!
//! Code is never executed. A submission passes when it names the entry point
//! (`solve` or `Solution`), returns something, and is long enough to hold
//! more than the starter template's signature.

use serde::{Deserialize, Serialize};

/// Submissions at or below this many characters never pass
pub const MIN_PASSING_LENGTH: usize = 60;

/// Verdict for a submitted solution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub has_entry_point: bool,
    pub has_return: bool,
    pub long_enough: bool,
}

impl Evaluation {
    pub fn passed(&self) -> bool {
        self.has_entry_point && self.has_return && self.long_enough
    }
}

/// Evaluate a submission with the keyword heuristic
pub fn evaluate_submission(code: &str) -> Evaluation {
    let lowered = code.to_lowercase();

    Evaluation {
        has_entry_point: lowered.contains("solve") || lowered.contains("solution"),
        has_return: lowered.contains("return"),
        long_enough: code.chars().count() > MIN_PASSING_LENGTH,
    }
}
