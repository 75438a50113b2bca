//! HTTP API
//!
//! Exposes the rating core, the submission flow, quiz grading and starter
//! templates over JSON, next to the health and Prometheus endpoints. Request
//! bodies are typed and validated here, once, before any core call.

use crate::error::{ArenaError, RatingError};
use crate::metrics::encode_metrics;
use crate::quiz::{grade_quiz, QuizResult};
use crate::rating::elo::ensure_finite;
use crate::rating::{expected_score, update_ratings, RatingUpdate};
use crate::service::app::AppState;
use crate::service::health::{HealthCheck, HealthStatus};
use crate::stats::{readiness_score, strongest_topic};
use crate::submission::{language_boilerplate, Language};
use crate::types::{
    Attempt, DashboardSummary, StrongestTopic, SubmissionOutcome, SubmitSolutionRequest, UserId,
};
use axum::{
    extract::{MatchedPath, Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error};

/// Error returned by API handlers
///
/// Caller mistakes become 400 responses, everything else a 500.
#[derive(Debug)]
pub struct ApiError(anyhow::Error);

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        if let Some(err) = self.0.downcast_ref::<ArenaError>() {
            if err.is_client_error() {
                return StatusCode::BAD_REQUEST;
            }
        }
        if self.0.downcast_ref::<RatingError>().is_some() {
            return StatusCode::BAD_REQUEST;
        }
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {:#}", self.0);
        } else {
            debug!("Request rejected: {}", self.0);
        }

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedScoreRequest {
    pub rating_a: f64,
    pub rating_b: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedScoreResponse {
    pub expected_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRatingsRequest {
    pub user_rating: f64,
    pub problem_rating: f64,
    pub actual_score: f64,
    /// Falls back to the configured k-factor
    #[serde(default)]
    pub k_factor: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessRequest {
    pub successful_attempts: f64,
    pub total_attempts: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessResponse {
    pub readiness_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrongestTopicRequest {
    pub attempts: Vec<Attempt>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrongestTopicResponse {
    pub strongest_topic: Option<StrongestTopic>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeQuizRequest {
    pub answers: Vec<usize>,
    pub answer_key: Vec<usize>,
    /// Falls back to the configured threshold
    #[serde(default)]
    pub pass_threshold: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoilerplateQuery {
    pub function_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoilerplateResponse {
    pub language: Language,
    pub mode: String,
    pub code: String,
}

/// Create the Axum router with every endpoint
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/alive", get(alive_handler))
        .route("/metrics", get(metrics_handler))
        .route("/api/rating/expected", post(expected_score_handler))
        .route("/api/rating/update", post(update_ratings_handler))
        .route("/api/readiness", post(readiness_handler))
        .route("/api/strongest-topic", post(strongest_topic_handler))
        .route("/api/submit-solution", post(submit_solution_handler))
        .route("/api/users/{user_id}/dashboard", get(dashboard_handler))
        .route("/api/quiz/grade", post(grade_quiz_handler))
        .route("/api/boilerplate/{language}", get(boilerplate_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            track_requests,
        ))
        .with_state(state)
}

async fn track_requests(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());

    let response = next.run(request).await;
    state
        .metrics()
        .record_http_request(&route, response.status().as_u16());

    response
}

/// Root endpoint handler - shows service information
async fn root_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "service": state.config().service.name,
        "version": env!("CARGO_PKG_VERSION"),
        "ratingEngine": state.submissions().calculator_config(),
        "endpoints": [
            "/health",
            "/ready",
            "/alive",
            "/metrics",
            "/api/rating/expected",
            "/api/rating/update",
            "/api/readiness",
            "/api/strongest-topic",
            "/api/submit-solution",
            "/api/users/{user_id}/dashboard",
            "/api/quiz/grade",
            "/api/boilerplate/{language}"
        ]
    }))
}

async fn health_handler(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let health = HealthCheck::check(&state).await?;
    let status = match health.status {
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::OK,
    };

    Ok((status, Json(health)).into_response())
}

async fn ready_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match HealthCheck::readiness_check(&state).await {
        HealthStatus::Healthy => (StatusCode::OK, "Ready"),
        HealthStatus::Degraded => (StatusCode::OK, "Degraded but ready"),
        HealthStatus::Unhealthy => (StatusCode::SERVICE_UNAVAILABLE, "Not ready"),
    }
}

async fn alive_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match HealthCheck::liveness_check(&state).await {
        HealthStatus::Unhealthy => (StatusCode::SERVICE_UNAVAILABLE, "Not alive"),
        _ => (StatusCode::OK, "Alive"),
    }
}

async fn metrics_handler(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let metrics = state.metrics();
    metrics.update_uptime(state.uptime());
    let body = encode_metrics(&metrics)?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
        .into_response())
}

async fn expected_score_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ExpectedScoreRequest>,
) -> ApiResult<ExpectedScoreResponse> {
    let result = ensure_finite("rating a", request.rating_a)
        .and_then(|_| ensure_finite("rating b", request.rating_b))
        .map(|_| expected_score(request.rating_a, request.rating_b));
    state
        .metrics()
        .record_core_operation("expected_score", result.is_ok());

    Ok(Json(ExpectedScoreResponse {
        expected_score: result?,
    }))
}

async fn update_ratings_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UpdateRatingsRequest>,
) -> ApiResult<RatingUpdate> {
    let k_factor = request
        .k_factor
        .unwrap_or(state.config().rating.k_factor);

    let result = update_ratings(
        request.user_rating,
        request.problem_rating,
        request.actual_score,
        k_factor,
    );
    state
        .metrics()
        .record_core_operation("update_ratings", result.is_ok());

    Ok(Json(result?))
}

async fn readiness_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ReadinessRequest>,
) -> ApiResult<ReadinessResponse> {
    let result = readiness_score(request.successful_attempts, request.total_attempts);
    state
        .metrics()
        .record_core_operation("readiness_score", result.is_ok());

    Ok(Json(ReadinessResponse {
        readiness_score: result?,
    }))
}

async fn strongest_topic_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StrongestTopicRequest>,
) -> ApiResult<StrongestTopicResponse> {
    state
        .metrics()
        .record_core_operation("strongest_topic", true);

    Ok(Json(StrongestTopicResponse {
        strongest_topic: strongest_topic(&request.attempts),
    }))
}

async fn submit_solution_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SubmitSolutionRequest>,
) -> ApiResult<SubmissionOutcome> {
    let outcome = state.submissions().submit(request)?;
    Ok(Json(outcome))
}

async fn dashboard_handler(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<UserId>,
) -> ApiResult<DashboardSummary> {
    let summary = state.submissions().dashboard(&user_id)?;
    Ok(Json(summary))
}

async fn grade_quiz_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GradeQuizRequest>,
) -> ApiResult<QuizResult> {
    let threshold = request
        .pass_threshold
        .unwrap_or(state.config().rating.quiz_pass_threshold);

    let result = grade_quiz(&request.answers, &request.answer_key, threshold)?;
    state.metrics().record_quiz(result.passed);

    Ok(Json(result))
}

async fn boilerplate_handler(
    Path(language): Path<String>,
    Query(query): Query<BoilerplateQuery>,
) -> ApiResult<BoilerplateResponse> {
    let language: Language = language.parse()?;
    let function_name = query.function_name.unwrap_or_else(|| "solve".to_string());

    let valid_identifier = function_name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && function_name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid_identifier {
        return Err(ArenaError::InvalidRequest {
            reason: format!("'{}' is not a valid function name", function_name),
        }
        .into());
    }

    Ok(Json(BoilerplateResponse {
        language,
        mode: language.mode().to_string(),
        code: language_boilerplate(language, &function_name),
    }))
}
