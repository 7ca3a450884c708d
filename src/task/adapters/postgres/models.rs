//! Diesel row models for task persistence.

use crate::storage::postgres::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Description text.
    pub description: String,
    /// Status string.
    pub status: String,
    /// Owning user.
    pub creator_id: uuid::Uuid,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Archived flag.
    pub archived: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Description text.
    pub description: String,
    /// Status string.
    pub status: String,
    /// Owning user.
    pub creator_id: uuid::Uuid,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Archived flag.
    pub archived: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Partial update for task records. `None` columns are left unchanged;
/// `due_date: Some(None)` writes `NULL`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskChangeset {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New status string.
    pub status: Option<String>,
    /// New or cleared due date.
    pub due_date: Option<Option<DateTime<Utc>>>,
    /// Update timestamp, always written.
    pub updated_at: DateTime<Utc>,
}
