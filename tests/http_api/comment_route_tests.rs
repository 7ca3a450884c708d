//! Comment routes and their authorship rules.

use super::helpers::{ALICE, ALICE_NAME, BOB, TestApp, app, error_code};
use axum::http::{Method, StatusCode};
use rstest::rstest;
use serde_json::{Value, json};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn any_user_may_comment_and_comments_list_oldest_first(app: TestApp) {
    let task_id = app.create_task(ALICE, "Ship release").await.expect("create");

    let first = app
        .create_comment(BOB, &task_id, "Looks good")
        .await
        .expect("bob comments");
    let second = app
        .create_comment(ALICE, &task_id, "Thanks")
        .await
        .expect("alice comments");

    let listed = app
        .send(
            Method::GET,
            &format!("/tasks/{task_id}/comments"),
            Some(BOB),
            None,
        )
        .await
        .expect("request should complete");
    assert_eq!(listed.status, StatusCode::OK);
    let ids: Vec<&str> = listed
        .body
        .as_array()
        .expect("comments array")
        .iter()
        .filter_map(|comment| comment["id"].as_str())
        .collect();
    assert_eq!(ids, vec![first.as_str(), second.as_str()]);
    assert_eq!(
        listed.body[0]["user_id"],
        Value::String(app.bob.into_inner().to_string())
    );
    assert!(listed.body[0].get("user_name").is_none());
    assert_eq!(listed.body[1]["user_name"], ALICE_NAME);

    assert_eq!(
        app.log_details(&task_id).await.expect("logs"),
        vec![
            "Added a comment".to_owned(),
            "Added a comment".to_owned(),
            "Created task: Ship release".to_owned(),
        ]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn commenting_on_a_missing_task_is_not_found(app: TestApp) {
    let uri = "/tasks/0b6f2a8e-1c1e-4b0a-8d2a-4f6b9d3c2e10/comments";

    let created = app
        .send(Method::POST, uri, Some(ALICE), Some(json!({ "content": "Hello" })))
        .await
        .expect("request should complete");
    assert_eq!(created.status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&created.body), Some("NOT_FOUND"));

    let listed = app
        .send(Method::GET, uri, Some(ALICE), None)
        .await
        .expect("request should complete");
    assert_eq!(listed.status, StatusCode::NOT_FOUND);
}

#[rstest]
#[case(json!({}))]
#[case(json!({ "content": "   " }))]
#[case(json!({ "content": "x".repeat(5001) }))]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_content_is_rejected(#[case] body: Value) {
    let test_app = TestApp::new();
    let task_id = test_app
        .create_task(ALICE, "Ship release")
        .await
        .expect("create");

    let response = test_app
        .send(
            Method::POST,
            &format!("/tasks/{task_id}/comments"),
            Some(ALICE),
            Some(body),
        )
        .await
        .expect("request should complete");

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&response.body), Some("VALIDATION_ERROR"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn only_the_author_may_edit_or_delete(app: TestApp) {
    let task_id = app.create_task(ALICE, "Ship release").await.expect("create");
    let comment_id = app
        .create_comment(BOB, &task_id, "Looks good")
        .await
        .expect("bob comments");
    let uri = format!("/comments/{comment_id}");

    let edit_by_owner = app
        .send(Method::PUT, &uri, Some(ALICE), Some(json!({ "content": "Edited" })))
        .await
        .expect("request should complete");
    assert_eq!(edit_by_owner.status, StatusCode::FORBIDDEN);
    let delete_by_owner = app
        .send(Method::DELETE, &uri, Some(ALICE), None)
        .await
        .expect("request should complete");
    assert_eq!(delete_by_owner.status, StatusCode::FORBIDDEN);

    let edited = app
        .send(Method::PUT, &uri, Some(BOB), Some(json!({ "content": "Ship it" })))
        .await
        .expect("request should complete");
    assert_eq!(edited.status, StatusCode::OK);
    assert_eq!(edited.body["content"], "Ship it");
    assert_eq!(edited.body["task_id"], Value::String(task_id.clone()));

    let deleted = app
        .send(Method::DELETE, &uri, Some(BOB), None)
        .await
        .expect("request should complete");
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body, json!({ "message": "Comment deleted successfully" }));

    let again = app
        .send(Method::DELETE, &uri, Some(BOB), None)
        .await
        .expect("request should complete");
    assert_eq!(again.status, StatusCode::NOT_FOUND);

    assert_eq!(
        app.log_details(&task_id).await.expect("logs"),
        vec![
            "Deleted a comment".to_owned(),
            "Updated a comment".to_owned(),
            "Added a comment".to_owned(),
            "Created task: Ship release".to_owned(),
        ]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_task_removes_its_comments(app: TestApp) {
    let task_id = app.create_task(ALICE, "Ship release").await.expect("create");
    let comment_id = app
        .create_comment(BOB, &task_id, "Looks good")
        .await
        .expect("bob comments");

    let deleted = app
        .send(Method::DELETE, &format!("/tasks/{task_id}"), Some(ALICE), None)
        .await
        .expect("request should complete");
    assert_eq!(deleted.status, StatusCode::OK);

    let edit = app
        .send(
            Method::PUT,
            &format!("/comments/{comment_id}"),
            Some(BOB),
            Some(json!({ "content": "Still here?" })),
        )
        .await
        .expect("request should complete");
    assert_eq!(edit.status, StatusCode::NOT_FOUND);
}
