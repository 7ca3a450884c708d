//! `limit`/`offset` validation and paging of task listings.

use super::helpers::{ALICE, TestApp, app, error_code};
use axum::http::{Method, StatusCode};
use rstest::rstest;
use serde_json::Value;

#[rstest]
#[case("/tasks?limit=0")]
#[case("/tasks?limit=101")]
#[case("/tasks?offset=-1")]
#[case("/tasks/archived?limit=0")]
#[tokio::test(flavor = "multi_thread")]
async fn out_of_range_values_are_rejected(#[case] uri: &str) {
    let test_app = TestApp::new();
    let response = test_app
        .send(Method::GET, uri, Some(ALICE), None)
        .await
        .expect("request should complete");

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&response.body), Some("VALIDATION_ERROR"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn non_numeric_values_are_rejected(app: TestApp) {
    let response = app
        .send(Method::GET, "/tasks?limit=ten", Some(ALICE), None)
        .await
        .expect("request should complete");

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&response.body), Some("INVALID_QUERY"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn pages_walk_newest_first_with_default_limit(app: TestApp) {
    let mut created = Vec::new();
    for index in 0..12 {
        created.push(
            app.create_task(ALICE, &format!("Task {index}"))
                .await
                .expect("create"),
        );
    }
    created.reverse();

    let ids = |body: &Value| -> Vec<String> {
        body.as_array()
            .map(|tasks| {
                tasks
                    .iter()
                    .filter_map(|task| task["id"].as_str().map(str::to_owned))
                    .collect()
            })
            .unwrap_or_default()
    };

    let first = app
        .send(Method::GET, "/tasks", Some(ALICE), None)
        .await
        .expect("request should complete");
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(ids(&first.body), created[..10].to_vec());

    let second = app
        .send(Method::GET, "/tasks?limit=5&offset=10", Some(ALICE), None)
        .await
        .expect("request should complete");
    assert_eq!(ids(&second.body), created[10..].to_vec());

    let beyond = app
        .send(Method::GET, "/tasks?offset=100", Some(ALICE), None)
        .await
        .expect("request should complete");
    assert_eq!(beyond.status, StatusCode::OK);
    assert!(ids(&beyond.body).is_empty());
}
