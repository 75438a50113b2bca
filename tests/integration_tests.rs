//! Integration tests for the algo-arena rating service
//!
//! These tests drive the HTTP router end to end, including:
//! - The Elo, readiness and strongest-topic endpoints
//! - The submission flow and the dashboard built from it
//! - Quiz grading and starter templates
//! - Error mapping and concurrent request handling

// Modules for organizing tests
mod fixtures;

use algo_arena::config::AppConfig;
use axum::http::{Method, StatusCode};
use fixtures::{
    create_test_app, create_test_app_with, get_request, json_request, send, submission_body,
    FAILING_CODE, PASSING_CODE,
};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_expected_score_endpoint() {
    let (app, _state) = create_test_app();

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/rating/expected",
            &json!({ "ratingA": 1500.0, "ratingB": 1500.0 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!((body["expectedScore"].as_f64().unwrap() - 0.5).abs() < 1e-12);
}

#[tokio::test]
async fn test_update_ratings_endpoint() {
    let (app, _state) = create_test_app();

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/rating/update",
            &json!({
                "userRating": 1500.0,
                "problemRating": 1500.0,
                "actualScore": 1.0,
                "kFactor": 32.0,
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["newUserRating"], 1516);
    assert_eq!(body["newProblemRating"], 1484);
}

#[tokio::test]
async fn test_update_ratings_uses_configured_k_factor() {
    let mut config = AppConfig::default();
    config.rating.k_factor = 16.0;
    let (app, _state) = create_test_app_with(config);

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/rating/update",
            &json!({ "userRating": 1500.0, "problemRating": 1500.0, "actualScore": 0.0 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["newUserRating"], 1492);
    assert_eq!(body["newProblemRating"], 1508);
}

#[tokio::test]
async fn test_negative_k_factor_is_bad_request() {
    let (app, _state) = create_test_app();

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/rating/update",
            &json!({
                "userRating": 1500.0,
                "problemRating": 1500.0,
                "actualScore": 1.0,
                "kFactor": -1.0,
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("k"));
}

#[tokio::test]
async fn test_readiness_endpoint() {
    let (app, _state) = create_test_app();

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/readiness",
            &json!({ "successfulAttempts": 3.0, "totalAttempts": 4.0 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["readinessScore"], 75.0);

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/readiness",
            &json!({ "successfulAttempts": -1.0, "totalAttempts": 4.0 }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_strongest_topic_endpoint() {
    let (app, _state) = create_test_app();

    let attempts = json!([
        { "topicId": "arrays", "outcomeScore": 1.0 },
        { "topicId": "arrays", "outcomeScore": 0.0 },
        { "topicId": "graphs", "outcomeScore": 1.0 },
        { "topicId": "graphs", "outcomeScore": 1.0 },
    ]);

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/strongest-topic",
            &json!({ "attempts": attempts }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let strongest = &body["strongestTopic"];
    assert_eq!(strongest["topicId"], "graphs");
    assert_eq!(strongest["totalAttempts"], 2);
    assert_eq!(strongest["successfulAttempts"], 2);
    assert_eq!(strongest["successRate"], 100.0);
}

#[tokio::test]
async fn test_strongest_topic_of_empty_history_is_null() {
    let (app, _state) = create_test_app();

    let (status, body) = send(
        &app,
        json_request(Method::POST, "/api/strongest-topic", &json!({ "attempts": [] })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["strongestTopic"].is_null());
}

#[tokio::test]
async fn test_submission_flow_updates_dashboard() {
    let (app, _state) = create_test_app();
    let user = Uuid::new_v4();
    let problem = Uuid::new_v4();

    // Step 1: a passing submission against fresh ratings
    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/submit-solution",
            &submission_body(user, problem, PASSING_CODE, "arrays"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["passed"], true);
    assert_eq!(body["newRating"], 1218);
    assert_eq!(body["ratingChange"], 18);
    assert_eq!(body["problemRating"], 1232);

    // Step 2: a failing submission on another topic
    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/submit-solution",
            &submission_body(user, Uuid::new_v4(), FAILING_CODE, "graphs"),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["passed"], false);
    assert!(body["ratingChange"].as_i64().unwrap() < 0);

    // Step 3: the dashboard reflects both attempts
    let (status, body) = send(
        &app,
        get_request(&format!("/api/users/{}/dashboard", user)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalAttempts"], 2);
    assert_eq!(body["successfulAttempts"], 1);
    assert_eq!(body["readinessScore"], 50.0);
    assert_eq!(body["strongestTopic"]["topicId"], "arrays");
}

#[tokio::test]
async fn test_empty_submission_is_bad_request() {
    let (app, _state) = create_test_app();

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/submit-solution",
            &submission_body(Uuid::new_v4(), Uuid::new_v4(), "   ", "arrays"),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("empty"));
}

#[tokio::test]
async fn test_malformed_user_id_is_rejected() {
    let (app, _state) = create_test_app();

    let (status, _body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/submit-solution",
            &json!({ "userId": "not-a-uuid", "problemId": Uuid::new_v4(), "code": PASSING_CODE }),
        ),
    )
    .await;
    assert!(status.is_client_error());

    let (status, _body) = send(&app, get_request("/api/users/not-a-uuid/dashboard")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_quiz_grading() {
    let (app, _state) = create_test_app();

    let (status, body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/quiz/grade",
            &json!({ "answers": [0, 1, 2, 3, 0], "answerKey": [0, 1, 2, 3, 1] }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"], 4);
    assert_eq!(body["passed"], true);
    assert_eq!(body["incorrectQuestions"], json!([4]));

    let (status, _body) = send(
        &app,
        json_request(
            Method::POST,
            "/api/quiz/grade",
            &json!({ "answers": [0, 1], "answerKey": [0, 1, 2] }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_boilerplate_endpoint() {
    let (app, _state) = create_test_app();

    let (status, body) = send(
        &app,
        get_request("/api/boilerplate/python?functionName=twoSum"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["language"], "python");
    assert_eq!(body["mode"], "python");
    assert!(body["code"].as_str().unwrap().contains("def twoSum"));

    let (status, _body) = send(&app, get_request("/api/boilerplate/cobol")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _body) = send(
        &app,
        get_request("/api/boilerplate/java?functionName=1bad"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_and_metrics_endpoints() {
    let (app, state) = create_test_app();
    state.set_running(true).await;

    let (status, body) = send(&app, get_request("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, get_request("/alive")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("Alive"));

    send(
        &app,
        json_request(
            Method::POST,
            "/api/rating/expected",
            &json!({ "ratingA": 1200.0, "ratingB": 1250.0 }),
        ),
    )
    .await;

    let (status, body) = send(&app, get_request("/metrics")).await;
    assert_eq!(status, StatusCode::OK);
    let text = body.as_str().unwrap();
    assert!(text.contains("algo_arena_http_requests_total"));
    assert!(text.contains("/api/rating/expected"));
    assert!(text.contains("algo_arena_core_operations_total"));
}

#[tokio::test]
async fn test_root_reports_rating_engine() {
    let mut config = AppConfig::default();
    config.rating.k_factor = 24.0;
    let (app, _state) = create_test_app_with(config);

    let (status, body) = send(&app, get_request("/")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "algo-arena");
    assert_eq!(body["ratingEngine"]["elo_config"]["k"], 24.0);
    assert_eq!(body["ratingEngine"]["initial_problem_rating"], 1250.0);
}

#[tokio::test]
async fn test_health_reports_unavailable_before_start() {
    let (app, _state) = create_test_app();

    let (status, _body) = send(&app, get_request("/ready")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_concurrent_submissions_are_all_recorded() {
    let (app, state) = create_test_app();
    let user = Uuid::new_v4();

    let requests = (0..20).map(|i| {
        let app = app.clone();
        let topic = if i % 2 == 0 { "arrays" } else { "graphs" };
        async move {
            send(
                &app,
                json_request(
                    Method::POST,
                    "/api/submit-solution",
                    &submission_body(user, Uuid::new_v4(), PASSING_CODE, topic),
                ),
            )
            .await
        }
    });

    let results = futures::future::join_all(requests).await;
    assert!(results.iter().all(|(status, _)| *status == StatusCode::OK));

    let summary = state.submissions().dashboard(&user).unwrap();
    assert_eq!(summary.total_attempts, 20);
    assert_eq!(summary.successful_attempts, 20);
    assert_eq!(summary.readiness_score, 100.0);
    assert!(summary.rating > 1200);
}
