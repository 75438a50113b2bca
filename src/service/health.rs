//! Health checks
//!
//! This module provides the health report served on `/health`, plus the
//! liveness and readiness probes.

use crate::service::app::AppState;
use crate::utils::{current_timestamp, format_uptime};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

/// Health check status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl HealthStatus {
    /// Gauge value (0=unhealthy, 1=degraded, 2=healthy)
    pub fn as_gauge(self) -> u8 {
        match self {
            HealthStatus::Healthy => 2,
            HealthStatus::Degraded => 1,
            HealthStatus::Unhealthy => 0,
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthStatus::Healthy => write!(f, "healthy"),
            HealthStatus::Degraded => write!(f, "degraded"),
            HealthStatus::Unhealthy => write!(f, "unhealthy"),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheck {
    /// Overall service status
    pub status: HealthStatus,
    /// Service name
    pub service: String,
    /// Crate version
    pub version: String,
    /// Current timestamp
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Detailed component checks
    pub checks: Vec<ComponentCheck>,
    /// Service statistics
    pub stats: ServiceStats,
}

/// Individual component health check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentCheck {
    /// Component name
    pub name: String,
    /// Component status
    pub status: HealthStatus,
    /// Optional error message if unhealthy
    pub message: Option<String>,
    /// Check duration in milliseconds
    pub duration_ms: u64,
}

/// Service statistics for health reporting
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceStats {
    pub rated_users: usize,
    pub rated_problems: usize,
    pub attempts_recorded: usize,
    pub uptime_info: String,
}

impl HealthCheck {
    /// Perform a health check of every component
    pub async fn check(app_state: &AppState) -> Result<Self> {
        let checks = vec![
            Self::check_service_running(app_state).await,
            Self::check_rating_storage(app_state),
            Self::check_attempt_storage(app_state),
        ];

        let status = checks
            .iter()
            .fold(HealthStatus::Healthy, |overall, check| {
                match (overall, check.status) {
                    (HealthStatus::Unhealthy, _) | (_, HealthStatus::Unhealthy) => {
                        HealthStatus::Unhealthy
                    }
                    (HealthStatus::Degraded, _) | (_, HealthStatus::Degraded) => {
                        HealthStatus::Degraded
                    }
                    _ => HealthStatus::Healthy,
                }
            });

        let metrics = app_state.metrics();
        metrics.update_health_status(status.as_gauge());
        metrics.update_uptime(app_state.uptime());
        for check in &checks {
            metrics.update_component_health(&check.name, check.status == HealthStatus::Healthy);
        }

        Ok(HealthCheck {
            status,
            service: app_state.config().service.name.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: current_timestamp(),
            checks,
            stats: Self::gather_service_stats(app_state),
        })
    }

    /// Simple liveness check - just verify service is running
    pub async fn liveness_check(app_state: &AppState) -> HealthStatus {
        if app_state.is_running().await {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        }
    }

    /// Readiness check - verify the stores can serve requests
    pub async fn readiness_check(app_state: &AppState) -> HealthStatus {
        if !app_state.is_running().await {
            return HealthStatus::Unhealthy;
        }

        let ratings = Self::check_rating_storage(app_state).status;
        let attempts = Self::check_attempt_storage(app_state).status;
        if ratings == HealthStatus::Healthy && attempts == HealthStatus::Healthy {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        }
    }

    async fn check_service_running(app_state: &AppState) -> ComponentCheck {
        let start = std::time::Instant::now();

        let (status, message) = if app_state.is_running().await {
            (HealthStatus::Healthy, None)
        } else {
            (
                HealthStatus::Unhealthy,
                Some("Service is not running".to_string()),
            )
        };

        ComponentCheck {
            name: "service_running".to_string(),
            status,
            message,
            duration_ms: start.elapsed().as_millis() as u64,
        }
    }

    fn check_rating_storage(app_state: &AppState) -> ComponentCheck {
        let start = std::time::Instant::now();

        let (status, message) = match app_state.submissions().rating_storage().get_counts() {
            Ok(_) => (HealthStatus::Healthy, None),
            Err(e) => {
                error!("Rating storage check failed: {}", e);
                (HealthStatus::Unhealthy, Some(e.to_string()))
            }
        };

        ComponentCheck {
            name: "rating_storage".to_string(),
            status,
            message,
            duration_ms: start.elapsed().as_millis() as u64,
        }
    }

    fn check_attempt_storage(app_state: &AppState) -> ComponentCheck {
        let start = std::time::Instant::now();

        let (status, message) = match app_state.submissions().attempt_storage().attempt_count() {
            Ok(_) => (HealthStatus::Healthy, None),
            Err(e) => {
                error!("Attempt storage check failed: {}", e);
                (HealthStatus::Unhealthy, Some(e.to_string()))
            }
        };

        ComponentCheck {
            name: "attempt_storage".to_string(),
            status,
            message,
            duration_ms: start.elapsed().as_millis() as u64,
        }
    }

    fn gather_service_stats(app_state: &AppState) -> ServiceStats {
        let submissions = app_state.submissions();
        let uptime_info = format_uptime(app_state.uptime());

        let (rated_users, rated_problems) = match submissions.rating_storage().get_counts() {
            Ok(counts) => counts,
            Err(e) => {
                debug!("Failed to count ratings for health check: {}", e);
                (0, 0)
            }
        };
        let attempts_recorded = submissions
            .attempt_storage()
            .attempt_count()
            .unwrap_or_default();

        ServiceStats {
            rated_users,
            rated_problems,
            attempts_recorded,
            uptime_info,
        }
    }
}
