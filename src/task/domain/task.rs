//! Task aggregate root and task status.

use super::{ParseTaskStatusError, TaskId, TaskPatch, TaskTitle};
use crate::identity::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task workflow status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Work has not started.
    #[default]
    #[serde(rename = "To Do")]
    ToDo,
    /// Work is underway.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Work is complete.
    #[serde(rename = "Done")]
    Done,
}

impl TaskStatus {
    /// Returns the canonical wire and storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToDo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "To Do" => Ok(Self::ToDo),
            "In Progress" => Ok(Self::InProgress),
            "Done" => Ok(Self::Done),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: TaskTitle,
    description: String,
    status: TaskStatus,
    due_date: Option<DateTime<Utc>>,
}

impl TaskDraft {
    /// Creates a draft with the required title, an empty description, and
    /// the default status.
    #[must_use]
    pub fn new(title: TaskTitle) -> Self {
        Self {
            title,
            description: String::new(),
            status: TaskStatus::default(),
            due_date: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: String,
    status: TaskStatus,
    creator_id: UserId,
    creator_name: Option<String>,
    due_date: Option<DateTime<Utc>>,
    archived: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: String,
    /// Persisted status.
    pub status: TaskStatus,
    /// Owning user.
    pub creator_id: UserId,
    /// Display name of the owning user, when the store knows it.
    pub creator_name: Option<String>,
    /// Persisted due date, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Persisted archived flag.
    pub archived: bool,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new, unarchived task owned by `creator_id`.
    #[must_use]
    pub fn new(draft: TaskDraft, creator_id: UserId, clock: &impl Clock) -> Self {
        let timestamp = crate::timestamp::now(clock);
        let TaskDraft {
            title,
            description,
            status,
            due_date,
        } = draft;

        Self {
            id: TaskId::new(),
            title,
            description,
            status,
            creator_id,
            creator_name: None,
            due_date,
            archived: false,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            status: data.status,
            creator_id: data.creator_id,
            creator_name: data.creator_name,
            due_date: data.due_date,
            archived: data.archived,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn creator_id(&self) -> UserId {
        self.creator_id
    }

    /// Returns the owning user's display name, when it was loaded.
    #[must_use]
    pub fn creator_name(&self) -> Option<&str> {
        self.creator_name.as_deref()
    }

    /// Attaches the owning user's display name.
    #[must_use]
    pub fn with_creator_name(mut self, name: Option<String>) -> Self {
        self.creator_name = name;
        self
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns whether the task is archived.
    #[must_use]
    pub const fn is_archived(&self) -> bool {
        self.archived
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies the fields present in `patch`, leaving the rest untouched.
    pub fn apply_patch(&mut self, patch: &TaskPatch, updated_at: DateTime<Utc>) {
        if let Some(title) = patch.title() {
            self.title = title.clone();
        }
        if let Some(description) = patch.description() {
            self.description = description.to_owned();
        }
        if let Some(status) = patch.status() {
            self.status = status;
        }
        if let Some(change) = patch.due_date() {
            self.due_date = change.into_option();
        }
        self.updated_at = updated_at;
    }

    /// Sets the archived flag.
    pub const fn set_archived(&mut self, archived: bool, updated_at: DateTime<Utc>) {
        self.archived = archived;
        self.updated_at = updated_at;
    }
}
