//! Derived statistics over a user's attempt history

pub mod readiness;
pub mod strongest_topic;

pub use readiness::readiness_score;
pub use strongest_topic::strongest_topic;
