//! Algo Arena - Elo-rated practice service for algorithm problems
//!
//! This crate provides the Elo rating core shared by users and problems,
//! readiness and strongest-topic statistics, the solution submission flow,
//! and the HTTP service that exposes them.

pub mod config;
pub mod error;
pub mod metrics;
pub mod quiz;
pub mod rating;
pub mod service;
pub mod stats;
pub mod submission;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{ArenaError, RatingError, Result};
pub use types::*;

// Re-export the rating core
pub use rating::{expected_score, update_ratings, RatingUpdate};
pub use stats::{readiness_score, strongest_topic};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
