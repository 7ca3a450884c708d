//! Diesel row models for comment persistence.

use crate::storage::postgres::schema::comments;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for comments.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CommentRow {
    /// Comment identifier.
    pub id: uuid::Uuid,
    /// Parent task.
    pub task_id: uuid::Uuid,
    /// Authoring user.
    pub user_id: uuid::Uuid,
    /// Comment body.
    pub content: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for comments.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = comments)]
pub struct NewCommentRow {
    /// Comment identifier.
    pub id: uuid::Uuid,
    /// Parent task.
    pub task_id: uuid::Uuid,
    /// Authoring user.
    pub user_id: uuid::Uuid,
    /// Comment body.
    pub content: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
