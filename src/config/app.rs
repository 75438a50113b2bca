//! Main application configuration
//!
//! This module defines the primary configuration structures for the
//! algo-arena service, including environment variable and TOML file loading
//! and validation.

use crate::config::rating::RatingConfig;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub rating: RatingConfig,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging and metrics
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Address the HTTP API binds to
    pub http_host: String,
    /// Port for the HTTP API, health and metrics endpoints
    pub http_port: u16,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout_seconds: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "algo-arena".to_string(),
            log_level: "info".to_string(),
            http_host: "0.0.0.0".to_string(),
            http_port: 8080,
            shutdown_timeout_seconds: 30,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_overrides(env_lookup)?;

        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        Self::from_toml_with_overrides(&raw, env_lookup)
    }

    /// Parse configuration from TOML text; missing keys take their defaults
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Self::from_toml_with_overrides(raw, |_| None)
    }

    /// Parse TOML, layer `lookup` values on top and validate the result once
    pub fn from_toml_with_overrides<F>(raw: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: Self = toml::from_str(raw).context("Invalid TOML configuration")?;
        config.apply_overrides(lookup)?;

        validate_config(&config)?;
        Ok(config)
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Service settings
        if let Some(name) = lookup("SERVICE_NAME") {
            self.service.name = name;
        }
        if let Some(log_level) = lookup("LOG_LEVEL") {
            self.service.log_level = log_level;
        }
        if let Some(host) = lookup("HTTP_HOST") {
            self.service.http_host = host;
        }
        if let Some(port) = lookup("HTTP_PORT") {
            self.service.http_port = port
                .parse()
                .map_err(|_| anyhow!("Invalid HTTP_PORT value: {}", port))?;
        }
        if let Some(timeout) = lookup("SHUTDOWN_TIMEOUT_SECONDS") {
            self.service.shutdown_timeout_seconds = timeout
                .parse()
                .map_err(|_| anyhow!("Invalid SHUTDOWN_TIMEOUT_SECONDS value: {}", timeout))?;
        }

        // Rating settings
        if let Some(k_factor) = lookup("K_FACTOR") {
            self.rating.k_factor = k_factor
                .parse()
                .map_err(|_| anyhow!("Invalid K_FACTOR value: {}", k_factor))?;
        }
        if let Some(rating) = lookup("DEFAULT_USER_RATING") {
            self.rating.default_user_rating = rating
                .parse()
                .map_err(|_| anyhow!("Invalid DEFAULT_USER_RATING value: {}", rating))?;
        }
        if let Some(rating) = lookup("DEFAULT_PROBLEM_RATING") {
            self.rating.default_problem_rating = rating
                .parse()
                .map_err(|_| anyhow!("Invalid DEFAULT_PROBLEM_RATING value: {}", rating))?;
        }
        if let Some(threshold) = lookup("QUIZ_PASS_THRESHOLD") {
            self.rating.quiz_pass_threshold = threshold
                .parse()
                .map_err(|_| anyhow!("Invalid QUIZ_PASS_THRESHOLD value: {}", threshold))?;
        }

        Ok(())
    }

    /// Get shutdown timeout as Duration
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.service.shutdown_timeout_seconds)
    }

    /// Socket address string for the HTTP listener
    pub fn http_addr(&self) -> String {
        format!("{}:{}", self.service.http_host, self.service.http_port)
    }
}

fn env_lookup(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    // Validate log level
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.http_host.is_empty() {
        return Err(anyhow!("HTTP host cannot be empty"));
    }
    if config.service.shutdown_timeout_seconds == 0 {
        return Err(anyhow!("Shutdown timeout must be greater than 0"));
    }

    // Validate rating settings
    if !config.rating.k_factor.is_finite() || config.rating.k_factor < 0.0 {
        return Err(anyhow!(
            "K-factor must be a finite, non-negative number, got {}",
            config.rating.k_factor
        ));
    }
    if !config.rating.default_user_rating.is_finite() {
        return Err(anyhow!("Default user rating must be finite"));
    }
    if !config.rating.default_problem_rating.is_finite() {
        return Err(anyhow!("Default problem rating must be finite"));
    }
    if config.rating.quiz_pass_threshold == 0 {
        return Err(anyhow!("Quiz pass threshold must be greater than 0"));
    }

    Ok(())
}
