//! Task lifecycle across the shared in-memory store.

use super::helpers::{Board, board};
use chrono::{TimeZone, Utc};
use rstest::rstest;
use taskboard::{
    task::{
        domain::TaskStatus,
        services::{CreateTaskRequest, TaskServiceError, UpdateTaskRequest},
    },
    validation::Page,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_update_records_every_fragment(board: Board) {
    let task = board.create_task("Ship release").await.expect("create");
    let due = Utc
        .with_ymd_and_hms(2026, 11, 3, 9, 30, 0)
        .single()
        .expect("valid date");

    let update = board
        .tasks
        .update(
            task.id(),
            board.owner,
            UpdateTaskRequest::new()
                .with_title("Ship 2.0")
                .with_description("Tag, build, and publish")
                .with_status("In Progress")
                .with_due_date(Some(due)),
        )
        .await
        .expect("update should succeed");

    assert_eq!(update.task.title().as_str(), "Ship 2.0");
    assert_eq!(update.task.description(), "Tag, build, and publish");
    assert_eq!(update.task.status(), TaskStatus::InProgress);
    assert_eq!(update.task.due_date(), Some(due));
    assert!(update.task.updated_at() >= task.updated_at());

    let details = board.details(&task).await.expect("history");
    assert_eq!(
        details.first().map(String::as_str),
        Some(
            "changed title to 'Ship 2.0', updated description, changed status to \
             'In Progress', and changed due date to '2026-11-03'"
        )
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_status_on_create_falls_back_to_default(board: Board) {
    let task = board
        .tasks
        .create(
            board.owner,
            CreateTaskRequest::new("Ship release").with_status(""),
        )
        .await
        .expect("create should succeed");

    assert_eq!(task.status(), TaskStatus::ToDo);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_status_on_update_is_invalid(board: Board) {
    let task = board.create_task("Ship release").await.expect("create");

    let result = board
        .tasks
        .update(task.id(), board.owner, UpdateTaskRequest::new().with_status(""))
        .await;

    assert!(matches!(result, Err(TaskServiceError::Validation(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn archived_listing_is_most_recently_updated_first(board: Board) {
    let first = board.create_task("First").await.expect("create");
    let second = board.create_task("Second").await.expect("create");

    board
        .tasks
        .archive(second.id(), board.owner)
        .await
        .expect("archive second");
    std::thread::sleep(std::time::Duration::from_millis(2));
    board
        .tasks
        .archive(first.id(), board.owner)
        .await
        .expect("archive first");

    let archived = board
        .tasks
        .list_archived(Page::default())
        .await
        .expect("archived list");
    let ids: Vec<_> = archived.iter().map(|task| task.id()).collect();
    assert_eq!(ids, vec![first.id(), second.id()]);
    assert!(
        board
            .tasks
            .list(Page::default())
            .await
            .expect("active list")
            .is_empty()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn archiving_twice_is_allowed_and_logged_twice(board: Board) {
    let task = board.create_task("Ship release").await.expect("create");

    for _ in 0..2 {
        board
            .tasks
            .archive(task.id(), board.owner)
            .await
            .expect("archive");
    }

    let details = board.details(&task).await.expect("history");
    assert_eq!(
        details,
        vec![
            "Archived task: Ship release".to_owned(),
            "Archived task: Ship release".to_owned(),
            "Created task: Ship release".to_owned(),
        ]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn non_owner_update_leaves_history_untouched(board: Board) {
    let task = board.create_task("Ship release").await.expect("create");

    let result = board
        .tasks
        .update(
            task.id(),
            board.other,
            UpdateTaskRequest::new().with_title("Hijacked"),
        )
        .await;

    assert!(matches!(result, Err(TaskServiceError::Forbidden { .. })));
    assert_eq!(
        board.details(&task).await.expect("history"),
        vec!["Created task: Ship release".to_owned()]
    );
    assert_eq!(
        board.tasks.get(task.id()).await.expect("task").title().as_str(),
        "Ship release"
    );
}
