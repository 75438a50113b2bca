//! Service layer for the algo-arena rating service
//!
//! This module contains the shared application state, health reporting,
//! the HTTP routes and the server lifecycle.

pub mod app;
pub mod health;
pub mod routes;
pub mod server;

pub use app::{AppState, ServiceError};
pub use health::{HealthCheck, HealthStatus};
pub use routes::{create_router, ApiError};
pub use server::ApiServer;
