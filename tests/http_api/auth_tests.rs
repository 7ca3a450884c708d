//! Bearer-token handling and the health endpoint.

use super::helpers::{ALICE, TestApp, app, error_code};
use axum::http::{Method, StatusCode};
use rstest::rstest;
use serde_json::json;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn health_needs_no_token(app: TestApp) {
    let response = app
        .send(Method::GET, "/health", None, None)
        .await
        .expect("request should complete");

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "status": "ok" }));
}

#[rstest]
#[case(Method::GET, "/tasks")]
#[case(Method::POST, "/tasks")]
#[case(Method::GET, "/tasks/archived")]
#[case(Method::GET, "/tasks/0b6f2a8e-1c1e-4b0a-8d2a-4f6b9d3c2e10/logs")]
#[case(Method::DELETE, "/comments/0b6f2a8e-1c1e-4b0a-8d2a-4f6b9d3c2e10")]
#[tokio::test(flavor = "multi_thread")]
async fn missing_token_is_unauthorized(#[case] method: Method, #[case] uri: &str) {
    let test_app = TestApp::new();
    let response = test_app
        .send(method, uri, None, Some(json!({ "title": "Ship release" })))
        .await
        .expect("request should complete");

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&response.body), Some("UNAUTHORIZED"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_token_is_unauthorized_and_creates_nothing(app: TestApp) {
    let rejected = app
        .send(
            Method::POST,
            "/tasks",
            Some("stolen-token"),
            Some(json!({ "title": "Ship release" })),
        )
        .await
        .expect("request should complete");
    assert_eq!(rejected.status, StatusCode::UNAUTHORIZED);

    let listed = app
        .send(Method::GET, "/tasks", Some(ALICE), None)
        .await
        .expect("request should complete");
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body, json!([]));
}
