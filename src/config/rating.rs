//! Rating system configuration

use crate::quiz::DEFAULT_PASS_THRESHOLD;
use crate::rating::elo::{ExtendedEloConfig, DEFAULT_K_FACTOR};
use serde::{Deserialize, Serialize};
use skillratings::elo::EloConfig;

/// Rating engine and topic gating settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// Maximum rating swing per submission
    pub k_factor: f64,
    /// Rating for users without history
    pub default_user_rating: f64,
    /// Rating for problems without history
    pub default_problem_rating: f64,
    /// Correct quiz answers needed to unlock a topic
    pub quiz_pass_threshold: usize,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            k_factor: DEFAULT_K_FACTOR,
            default_user_rating: 1200.0,
            default_problem_rating: 1250.0,
            quiz_pass_threshold: DEFAULT_PASS_THRESHOLD,
        }
    }
}

impl RatingConfig {
    /// Calculator configuration derived from these settings
    pub fn elo_config(&self) -> ExtendedEloConfig {
        ExtendedEloConfig {
            elo_config: EloConfig { k: self.k_factor },
            initial_user_rating: self.default_user_rating,
            initial_problem_rating: self.default_problem_rating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elo_config_mirrors_settings() {
        let config = RatingConfig {
            k_factor: 24.0,
            default_user_rating: 1000.0,
            ..RatingConfig::default()
        };

        let elo = config.elo_config();
        assert_eq!(elo.k_factor(), 24.0);
        assert_eq!(elo.initial_user_rating, 1000.0);
        assert_eq!(elo.initial_problem_rating, 1250.0);
    }
}
