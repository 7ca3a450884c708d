//! Request and response bodies.

use crate::{
    change_log::domain::ChangeLogEntry,
    comment::domain::Comment,
    task::{
        domain::{Task, TaskStatus},
        services::{CreateTaskRequest, UpdateTaskRequest},
    },
    validation::{Page, ValidationResult},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Body of `POST /tasks`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTaskBody {
    /// Required title; a missing value is reported as a validation error.
    #[serde(default)]
    pub title: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Optional initial status.
    #[serde(default)]
    pub status: Option<String>,
    /// Optional due date.
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

impl From<CreateTaskBody> for CreateTaskRequest {
    fn from(body: CreateTaskBody) -> Self {
        let mut request = Self::new(body.title);
        if let Some(description) = body.description {
            request = request.with_description(description);
        }
        if let Some(status) = body.status {
            request = request.with_status(status);
        }
        if let Some(due_date) = body.due_date {
            request = request.with_due_date(due_date);
        }
        request
    }
}

/// Body of `PUT /tasks/{id}`. Absent fields are left untouched; an explicit
/// `"due_date": null` clears the due date.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTaskBody {
    /// New title.
    #[serde(default)]
    pub title: Option<String>,
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
    /// New status.
    #[serde(default)]
    pub status: Option<String>,
    /// New due date, or `Some(None)` to clear it.
    #[serde(default, deserialize_with = "present_or_null")]
    pub due_date: Option<Option<DateTime<Utc>>>,
}

impl From<UpdateTaskBody> for UpdateTaskRequest {
    fn from(body: UpdateTaskBody) -> Self {
        let mut request = Self::new();
        if let Some(title) = body.title {
            request = request.with_title(title);
        }
        if let Some(description) = body.description {
            request = request.with_description(description);
        }
        if let Some(status) = body.status {
            request = request.with_status(status);
        }
        if let Some(due_date) = body.due_date {
            request = request.with_due_date(due_date);
        }
        request
    }
}

/// Distinguishes an explicit `null` from an absent field. Used together
/// with `#[serde(default)]`, which covers the absent case.
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Body of comment create and update requests.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentBody {
    /// Comment text.
    #[serde(default)]
    pub content: String,
}

/// `limit`/`offset` query parameters.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    /// Page size, default 10.
    pub limit: Option<i64>,
    /// Rows to skip, default 0.
    pub offset: Option<i64>,
}

impl PageQuery {
    /// Validates the query into a [`Page`].
    ///
    /// # Errors
    ///
    /// Returns a [`crate::validation::ValidationError`] when a value is out
    /// of range.
    pub fn into_page(self) -> ValidationResult<Page> {
        Page::from_query(self.limit, self.offset)
    }
}

/// Task representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResponse {
    /// Task identifier.
    pub id: Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Status.
    pub status: TaskStatus,
    /// Owning user.
    pub creator_id: Uuid,
    /// Owning user's display name, omitted when unknown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_name: Option<String>,
    /// Due date, omitted when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    /// Archived flag.
    pub archived: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().into_inner(),
            title: task.title().as_str().to_owned(),
            description: task.description().to_owned(),
            status: task.status(),
            creator_id: task.creator_id().into_inner(),
            creator_name: task.creator_name().map(str::to_owned),
            due_date: task.due_date(),
            archived: task.is_archived(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}

/// Comment representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentResponse {
    /// Comment identifier.
    pub id: Uuid,
    /// Parent task.
    pub task_id: Uuid,
    /// Author.
    pub user_id: Uuid,
    /// Author's display name, omitted when unknown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    /// Comment text.
    pub content: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&Comment> for CommentResponse {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id().into_inner(),
            task_id: comment.task_id().into_inner(),
            user_id: comment.user_id().into_inner(),
            user_name: comment.user_name().map(str::to_owned),
            content: comment.content().as_str().to_owned(),
            created_at: comment.created_at(),
            updated_at: comment.updated_at(),
        }
    }
}

/// Change-log entry representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeLogResponse {
    /// Entry identifier.
    pub id: Uuid,
    /// Task the entry belongs to.
    pub task_id: Uuid,
    /// Acting user.
    pub user_id: Uuid,
    /// Acting user's display name, omitted when unknown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    /// Action tag.
    pub action: String,
    /// Human-readable details.
    pub details: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<&ChangeLogEntry> for ChangeLogResponse {
    fn from(entry: &ChangeLogEntry) -> Self {
        Self {
            id: entry.id().into_inner(),
            task_id: entry.task_id().into_inner(),
            user_id: entry.user_id().into_inner(),
            user_name: entry.user_name().map(str::to_owned),
            action: entry.action().as_str().to_owned(),
            details: entry.details().to_owned(),
            created_at: entry.created_at(),
        }
    }
}

/// Plain confirmation body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Confirmation text.
    pub message: String,
}

impl MessageResponse {
    /// Creates a confirmation body.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
