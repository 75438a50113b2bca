//! Solution submission flow
//!
//! This module judges submitted code, turns the verdict into rating updates,
//! and keeps the attempt history the dashboard is built from.

pub mod attempts;
pub mod boilerplate;
pub mod evaluator;
pub mod handler;

// Re-export commonly used types
pub use attempts::{AttemptStorage, InMemoryAttemptStorage};
pub use boilerplate::{language_boilerplate, Language};
pub use evaluator::{evaluate_submission, Evaluation};
pub use handler::SubmissionService;
