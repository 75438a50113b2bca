//! Metrics for the rating service
//!
//! This module provides Prometheus metrics collection and text encoding for
//! the `/metrics` endpoint.

pub mod collector;

pub use collector::{MetricsCollector, RatingMetrics, ServiceMetrics, SubmissionMetrics};

use prometheus::{Encoder, TextEncoder};

/// Render every metric in the collector's registry in the Prometheus text format
pub fn encode_metrics(collector: &MetricsCollector) -> anyhow::Result<String> {
    let encoder = TextEncoder::new();
    let metric_families = collector.registry().gather();

    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;

    Ok(String::from_utf8(buffer)?)
}
