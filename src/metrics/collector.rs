//! Metrics collection using Prometheus
//!
//! This module provides metrics collection for the rating engine and the
//! submission flow using Prometheus metrics.

use crate::types::Outcome;
use anyhow::Result;
use prometheus::{
    Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, IntGaugeVec, Opts, Registry,
};
use std::sync::Arc;
use std::time::Duration;

/// Main metrics collector for the service
#[derive(Clone)]
pub struct MetricsCollector {
    /// Prometheus registry
    registry: Arc<Registry>,

    /// Service-level metrics
    service_metrics: ServiceMetrics,

    /// Rating engine metrics
    rating_metrics: RatingMetrics,

    /// Submission and quiz metrics
    submission_metrics: SubmissionMetrics,
}

/// Service-level metrics
#[derive(Clone)]
pub struct ServiceMetrics {
    /// Service uptime in seconds
    pub uptime_seconds: IntGauge,

    /// HTTP requests by route and status class
    pub http_requests_total: IntCounterVec,

    /// Health check status (0=unhealthy, 1=degraded, 2=healthy)
    pub health_status: IntGauge,

    /// Component health status
    pub component_health: IntGaugeVec,
}

/// Rating engine metrics
#[derive(Clone)]
pub struct RatingMetrics {
    /// Rating updates applied, by user outcome
    pub rating_updates_total: IntCounterVec,

    /// Change of the user's rating per update
    pub user_rating_delta: Histogram,

    /// Rating calculation time
    pub rating_calculation_duration: Histogram,

    /// Pure core operations invoked through the API
    pub core_operations_total: IntCounterVec,

    /// Core operations rejected for invalid input
    pub core_errors_total: IntCounterVec,
}

/// Submission and quiz metrics
#[derive(Clone)]
pub struct SubmissionMetrics {
    /// Submissions evaluated, by verdict
    pub submissions_total: IntCounterVec,

    /// Submissions rejected before evaluation
    pub submissions_rejected_total: IntCounter,

    /// Quizzes graded, by verdict
    pub quizzes_graded_total: IntCounterVec,
}

impl MetricsCollector {
    /// Create a new metrics collector with default registry
    pub fn new() -> Result<Self> {
        let registry = Arc::new(Registry::new());
        Self::with_registry(registry)
    }

    /// Create a new metrics collector with custom registry
    pub fn with_registry(registry: Arc<Registry>) -> Result<Self> {
        let service_metrics = ServiceMetrics::new(&registry)?;
        let rating_metrics = RatingMetrics::new(&registry)?;
        let submission_metrics = SubmissionMetrics::new(&registry)?;

        Ok(Self {
            registry,
            service_metrics,
            rating_metrics,
            submission_metrics,
        })
    }

    /// Get the Prometheus registry
    pub fn registry(&self) -> Arc<Registry> {
        self.registry.clone()
    }

    pub fn service(&self) -> &ServiceMetrics {
        &self.service_metrics
    }

    pub fn rating(&self) -> &RatingMetrics {
        &self.rating_metrics
    }

    pub fn submission(&self) -> &SubmissionMetrics {
        &self.submission_metrics
    }

    /// Record a rating update produced by a submission
    pub fn record_rating_update(&self, outcome: Outcome, user_delta: i64, duration: Duration) {
        self.rating_metrics
            .rating_updates_total
            .with_label_values(&[outcome.as_str()])
            .inc();

        self.rating_metrics
            .user_rating_delta
            .observe(user_delta as f64);

        self.rating_metrics
            .rating_calculation_duration
            .observe(duration.as_secs_f64());
    }

    /// Record a direct call into the rating core
    pub fn record_core_operation(&self, operation: &str, success: bool) {
        self.rating_metrics
            .core_operations_total
            .with_label_values(&[operation])
            .inc();

        if !success {
            self.rating_metrics
                .core_errors_total
                .with_label_values(&[operation])
                .inc();
        }
    }

    /// Record an evaluated submission
    pub fn record_submission(&self, passed: bool) {
        let verdict = if passed { "passed" } else { "failed" };

        self.submission_metrics
            .submissions_total
            .with_label_values(&[verdict])
            .inc();
    }

    /// Record a submission rejected during validation
    pub fn record_rejected_submission(&self) {
        self.submission_metrics.submissions_rejected_total.inc();
    }

    /// Record a graded quiz
    pub fn record_quiz(&self, passed: bool) {
        let verdict = if passed { "passed" } else { "failed" };

        self.submission_metrics
            .quizzes_graded_total
            .with_label_values(&[verdict])
            .inc();
    }

    /// Record an HTTP request by route and status code
    pub fn record_http_request(&self, route: &str, status: u16) {
        let class = match status {
            200..=299 => "2xx",
            400..=499 => "4xx",
            500..=599 => "5xx",
            _ => "other",
        };

        self.service_metrics
            .http_requests_total
            .with_label_values(&[route, class])
            .inc();
    }

    /// Update uptime
    pub fn update_uptime(&self, uptime: Duration) {
        self.service_metrics
            .uptime_seconds
            .set(uptime.as_secs() as i64);
    }

    /// Update health status
    pub fn update_health_status(&self, status: u8) {
        self.service_metrics.health_status.set(status as i64);
    }

    /// Update component health
    pub fn update_component_health(&self, component: &str, healthy: bool) {
        let status = if healthy { 1 } else { 0 };
        self.service_metrics
            .component_health
            .with_label_values(&[component])
            .set(status);
    }
}

impl ServiceMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let uptime_seconds =
            IntGauge::new("algo_arena_uptime_seconds", "Service uptime in seconds")?;
        registry.register(Box::new(uptime_seconds.clone()))?;

        let http_requests_total = IntCounterVec::new(
            Opts::new("algo_arena_http_requests_total", "Total HTTP requests"),
            &["route", "status"],
        )?;
        registry.register(Box::new(http_requests_total.clone()))?;

        let health_status = IntGauge::new(
            "algo_arena_health_status",
            "Health status (0=unhealthy, 1=degraded, 2=healthy)",
        )?;
        registry.register(Box::new(health_status.clone()))?;

        let component_health = IntGaugeVec::new(
            Opts::new("algo_arena_component_health", "Component health status"),
            &["component"],
        )?;
        registry.register(Box::new(component_health.clone()))?;

        Ok(Self {
            uptime_seconds,
            http_requests_total,
            health_status,
            component_health,
        })
    }
}

impl RatingMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let rating_updates_total = IntCounterVec::new(
            Opts::new(
                "algo_arena_rating_updates_total",
                "Total rating updates applied",
            ),
            &["outcome"],
        )?;
        registry.register(Box::new(rating_updates_total.clone()))?;

        let user_rating_delta = Histogram::with_opts(
            HistogramOpts::new(
                "algo_arena_user_rating_delta",
                "Change of the user rating per submission",
            )
            .buckets(vec![
                -32.0, -24.0, -16.0, -8.0, -1.0, 0.0, 1.0, 8.0, 16.0, 24.0, 32.0,
            ]),
        )?;
        registry.register(Box::new(user_rating_delta.clone()))?;

        let rating_calculation_duration = Histogram::with_opts(
            HistogramOpts::new(
                "algo_arena_rating_calculation_duration_seconds",
                "Rating calculation time",
            )
            .buckets(vec![0.00001, 0.0001, 0.001, 0.005, 0.01, 0.05]),
        )?;
        registry.register(Box::new(rating_calculation_duration.clone()))?;

        let core_operations_total = IntCounterVec::new(
            Opts::new(
                "algo_arena_core_operations_total",
                "Rating core operations invoked",
            ),
            &["operation"],
        )?;
        registry.register(Box::new(core_operations_total.clone()))?;

        let core_errors_total = IntCounterVec::new(
            Opts::new(
                "algo_arena_core_errors_total",
                "Rating core operations rejected",
            ),
            &["operation"],
        )?;
        registry.register(Box::new(core_errors_total.clone()))?;

        Ok(Self {
            rating_updates_total,
            user_rating_delta,
            rating_calculation_duration,
            core_operations_total,
            core_errors_total,
        })
    }
}

impl SubmissionMetrics {
    fn new(registry: &Registry) -> Result<Self> {
        let submissions_total = IntCounterVec::new(
            Opts::new(
                "algo_arena_submissions_total",
                "Total submissions evaluated",
            ),
            &["verdict"],
        )?;
        registry.register(Box::new(submissions_total.clone()))?;

        let submissions_rejected_total = IntCounter::new(
            "algo_arena_submissions_rejected_total",
            "Submissions rejected during validation",
        )?;
        registry.register(Box::new(submissions_rejected_total.clone()))?;

        let quizzes_graded_total = IntCounterVec::new(
            Opts::new("algo_arena_quizzes_graded_total", "Total quizzes graded"),
            &["verdict"],
        )?;
        registry.register(Box::new(quizzes_graded_total.clone()))?;

        Ok(Self {
            submissions_total,
            submissions_rejected_total,
            quizzes_graded_total,
        })
    }
}
