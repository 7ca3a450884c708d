//! Unvalidated request payloads for task operations.

use crate::{
    task::domain::{DueDateChange, TaskDraft, TaskPatch, TaskStatus, TaskTitle},
    timestamp,
    validation::ValidationResult,
};
use chrono::{DateTime, Utc};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    status: Option<String>,
    due_date: Option<DateTime<Utc>>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: None,
            due_date: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Validates the request into a [`TaskDraft`].
    ///
    /// An empty status string is treated as not supplied.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::validation::ValidationError`] for the first
    /// invalid field.
    pub fn into_draft(self) -> ValidationResult<TaskDraft> {
        let mut draft = TaskDraft::new(TaskTitle::new(self.title)?);
        if let Some(description) = self.description {
            draft = draft.with_description(description);
        }
        if let Some(status) = self.status.filter(|status| !status.is_empty()) {
            draft = draft.with_status(TaskStatus::try_from(status.as_str())?);
        }
        if let Some(due_date) = self.due_date {
            draft = draft.with_due_date(timestamp::truncate(due_date));
        }
        Ok(draft)
    }
}

/// Request payload for a partial task update. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    title: Option<String>,
    description: Option<String>,
    status: Option<String>,
    due_date: Option<Option<DateTime<Utc>>>,
}

impl UpdateTaskRequest {
    /// Creates a request with no fields present.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the status.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the due date; `None` clears it.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: Option<DateTime<Utc>>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Validates every present field into a [`TaskPatch`].
    ///
    /// # Errors
    ///
    /// Returns a [`crate::validation::ValidationError`] for the first
    /// invalid field.
    pub fn into_patch(self) -> ValidationResult<TaskPatch> {
        let mut patch = TaskPatch::new();
        if let Some(title) = self.title {
            patch = patch.with_title(TaskTitle::new(title)?);
        }
        if let Some(description) = self.description {
            patch = patch.with_description(description);
        }
        if let Some(status) = self.status {
            patch = patch.with_status(TaskStatus::try_from(status.as_str())?);
        }
        if let Some(due_date) = self.due_date {
            patch = patch.with_due_date(DueDateChange::from(due_date.map(timestamp::truncate)));
        }
        Ok(patch)
    }
}
