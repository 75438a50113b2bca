//! Elo rating engine for users and practice problems
//!
//! This module provides the pairwise rating update, the calculator interface
//! used by the submission flow, and rating storage.

pub mod calculator;
pub mod elo;
pub mod storage;

// Re-export commonly used types
pub use calculator::{NoOpRatingCalculator, RatingCalculator, RatingUpdate};
pub use elo::{
    expected_score, update_ratings, update_ratings_default, EloRatingCalculator,
    ExtendedEloConfig, DEFAULT_K_FACTOR,
};
pub use storage::{InMemoryRatingStorage, RatedEntity, RatingEntry, RatingStorage};
