//! Main application state and service coordination
//!
//! This module contains the AppState that wires the rating calculator, the
//! stores, the submission service and the metrics collector together.

use crate::config::AppConfig;
use crate::metrics::MetricsCollector;
use crate::rating::{EloRatingCalculator, InMemoryRatingStorage};
use crate::submission::{InMemoryAttemptStorage, SubmissionService};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

/// Service-level errors
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Service initialization error: {message}")]
    Initialization { message: String },
}

/// Main application state containing all service components
pub struct AppState {
    /// Application configuration
    config: AppConfig,

    /// Submission handling over the rating engine and stores
    submissions: Arc<SubmissionService>,

    /// Metrics collector shared by every component
    metrics: Arc<MetricsCollector>,

    /// Service start time
    started_at: Instant,

    /// Service status
    is_running: Arc<RwLock<bool>>,
}

impl AppState {
    /// Initialize the application with all dependencies
    pub fn new(config: AppConfig) -> Result<Self, ServiceError> {
        info!("Initializing {} service", config.service.name);
        info!(
            "Rating configuration: k_factor={}, default_user_rating={}, default_problem_rating={}",
            config.rating.k_factor,
            config.rating.default_user_rating,
            config.rating.default_problem_rating
        );

        let metrics = Arc::new(MetricsCollector::new().map_err(|e| {
            ServiceError::Initialization {
                message: format!("Failed to create metrics collector: {}", e),
            }
        })?);

        let calculator = EloRatingCalculator::new(config.rating.elo_config()).map_err(|e| {
            ServiceError::Configuration {
                message: format!("Invalid rating configuration: {}", e),
            }
        })?;

        let submissions = SubmissionService::new(
            Arc::new(calculator),
            Arc::new(InMemoryRatingStorage::new()),
            Arc::new(InMemoryAttemptStorage::new()),
        )
        .with_metrics(metrics.clone());

        Ok(Self {
            config,
            submissions: Arc::new(submissions),
            metrics,
            started_at: Instant::now(),
            is_running: Arc::new(RwLock::new(false)),
        })
    }

    /// Get service configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn submissions(&self) -> Arc<SubmissionService> {
        self.submissions.clone()
    }

    pub fn metrics(&self) -> Arc<MetricsCollector> {
        self.metrics.clone()
    }

    /// Time since the state was created
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Check if service is running
    pub async fn is_running(&self) -> bool {
        *self.is_running.read().await
    }

    pub async fn set_running(&self, running: bool) {
        *self.is_running.write().await = running;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_app_state_initialization() {
        let state = AppState::new(AppConfig::default()).unwrap();

        assert!(!state.is_running().await);
        state.set_running(true).await;
        assert!(state.is_running().await);

        assert_eq!(state.config().service.name, "algo-arena");
    }

    #[test]
    fn test_invalid_rating_config_rejected() {
        let mut config = AppConfig::default();
        config.rating.k_factor = -5.0;

        let result = AppState::new(config);
        assert!(matches!(result, Err(ServiceError::Configuration { .. })));
    }
}
