//! Test fixtures shared by the integration tests

#![allow(dead_code)]

use algo_arena::config::AppConfig;
use algo_arena::service::{create_router, AppState};
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

/// Code that the evaluator accepts
pub const PASSING_CODE: &str = "def solve(nums):\n    best = 0\n    for n in nums:\n        best = max(best, n)\n    return best\n";

/// Code that the evaluator rejects
pub const FAILING_CODE: &str = "print('todo')";

/// A fresh service with default configuration
pub fn create_test_app() -> (Router, Arc<AppState>) {
    create_test_app_with(AppConfig::default())
}

pub fn create_test_app_with(config: AppConfig) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(config).expect("test state"));
    (create_router(state.clone()), state)
}

pub fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub fn submission_body(user_id: Uuid, problem_id: Uuid, code: &str, topic: &str) -> Value {
    json!({
        "userId": user_id,
        "problemId": problem_id,
        "code": code,
        "language": "python",
        "topicId": topic,
    })
}

/// Send one request and decode the JSON body
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");

    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };

    (status, value)
}
