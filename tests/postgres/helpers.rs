//! Shared helpers for `PostgreSQL` integration tests.

use std::sync::Arc;

pub use super::cluster::{BoxError, PostgresCluster, postgres_cluster};
use super::cluster::TemporaryDatabase;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use mockable::DefaultClock;
use rstest::fixture;
use taskboard::{
    comment::services::CommentService,
    http::{DynCommentService, DynTaskService},
    identity::UserId,
    storage::{
        Repositories,
        postgres::{build_pool, register_users},
    },
    task::services::TaskService,
};
use uuid::Uuid;

/// SQL creating every table.
pub const CREATE_SCHEMA_SQL: &str =
    include_str!("../../migrations/2026-10-01-000000_create_task_tables/up.sql");

/// Template database name for the pre-migrated schema.
pub const TEMPLATE_DB: &str = "taskboard_test_template";

/// Display name registered for [`PgBoard::owner`].
pub const OWNER_NAME: &str = "Olive Owner";

/// Display name registered for [`PgBoard::other`].
pub const OTHER_NAME: &str = "Oscar Other";

/// Ensures the template database exists with the schema applied.
///
/// # Errors
///
/// Returns an error if template creation or migration fails.
pub async fn ensure_template(cluster: PostgresCluster) -> Result<(), BoxError> {
    cluster
        .ensure_template_exists(TEMPLATE_DB, apply_migrations)
        .await
}

/// Applies the schema to the database at `url`.
fn apply_migrations(url: &str) -> Result<(), BoxError> {
    let mut conn = PgConnection::establish(url)?;
    conn.batch_execute(CREATE_SCHEMA_SQL)?;
    Ok(())
}

/// Services wired over a temporary database.
pub struct PgBoard {
    /// Repositories over the temporary database.
    pub repositories: Repositories,
    /// Task operations.
    pub tasks: DynTaskService,
    /// Comment operations.
    pub comments: DynCommentService,
    /// Registered task owner.
    pub owner: UserId,
    /// A second registered user.
    pub other: UserId,
    _database: TemporaryDatabase,
}

/// Clones the migrated template into a fresh database with two named
/// users and wires the services over it.
///
/// # Errors
///
/// Returns an error when the cluster, template, or database cannot be
/// prepared.
#[fixture]
pub async fn pg_board(
    postgres_cluster: Result<PostgresCluster, BoxError>,
) -> Result<PgBoard, BoxError> {
    let cluster = postgres_cluster?;
    ensure_template(cluster).await?;
    let database = cluster
        .temporary_database_from_template(
            format!("taskboard_test_{}", Uuid::new_v4().simple()),
            TEMPLATE_DB,
        )
        .await?;
    let owner = UserId::new();
    let other = UserId::new();

    let url = database.url().to_owned();
    let pool = tokio::task::spawn_blocking(move || -> Result<_, BoxError> {
        let pool = build_pool(&url, 2)?;
        register_users(
            &pool,
            &[
                (owner, OWNER_NAME.to_owned()),
                (other, OTHER_NAME.to_owned()),
            ],
        )?;
        Ok(pool)
    })
    .await??;

    let repositories = Repositories::postgres(&pool);
    let clock = Arc::new(DefaultClock);
    let tasks = TaskService::new(
        Arc::clone(&repositories.tasks),
        Arc::clone(&repositories.change_logs),
        Arc::clone(&clock),
    );
    let comments = CommentService::new(
        Arc::clone(&repositories.comments),
        Arc::clone(&repositories.tasks),
        Arc::clone(&repositories.change_logs),
        clock,
    );

    Ok(PgBoard {
        repositories,
        tasks,
        comments,
        owner,
        other,
        _database: database,
    })
}
