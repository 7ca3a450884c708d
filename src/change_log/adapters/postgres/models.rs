//! Diesel row models for change-log persistence.

use crate::storage::postgres::schema::change_logs;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for change-log entries.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = change_logs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ChangeLogRow {
    /// Entry identifier.
    pub id: uuid::Uuid,
    /// Task the entry belongs to.
    pub task_id: uuid::Uuid,
    /// Acting user.
    pub user_id: uuid::Uuid,
    /// Action tag.
    pub action: String,
    /// Human-readable details.
    pub details: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for change-log entries.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = change_logs)]
pub struct NewChangeLogRow {
    /// Entry identifier.
    pub id: uuid::Uuid,
    /// Task the entry belongs to.
    pub task_id: uuid::Uuid,
    /// Acting user.
    pub user_id: uuid::Uuid,
    /// Action tag.
    pub action: String,
    /// Human-readable details.
    pub details: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
