//! Partial task updates.
//!
//! A [`TaskPatch`] carries only the fields the caller supplied. Absent
//! fields are `None` and are never written. The due date is tri-state so a
//! caller can clear it without that being confused with "not supplied".

use super::{TaskStatus, TaskTitle};
use chrono::{DateTime, Utc};

/// Requested change to a task's due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueDateChange {
    /// Set the due date to the given instant.
    Set(DateTime<Utc>),
    /// Remove the due date.
    Clear,
}

impl DueDateChange {
    /// Returns the due date value to store.
    #[must_use]
    pub const fn into_option(self) -> Option<DateTime<Utc>> {
        match self {
            Self::Set(value) => Some(value),
            Self::Clear => None,
        }
    }

    fn describe(self) -> String {
        match self {
            Self::Set(value) => format!("changed due date to '{}'", value.format("%Y-%m-%d")),
            Self::Clear => "cleared due date".to_owned(),
        }
    }
}

impl From<Option<DateTime<Utc>>> for DueDateChange {
    fn from(value: Option<DateTime<Utc>>) -> Self {
        value.map_or(Self::Clear, Self::Set)
    }
}

/// Validated set of task fields to update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    title: Option<TaskTitle>,
    description: Option<String>,
    status: Option<TaskStatus>,
    due_date: Option<DueDateChange>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a new title.
    #[must_use]
    pub fn with_title(mut self, title: TaskTitle) -> Self {
        self.title = Some(title);
        self
    }

    /// Sets a new description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets a new status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets or clears the due date.
    #[must_use]
    pub const fn with_due_date(mut self, change: DueDateChange) -> Self {
        self.due_date = Some(change);
        self
    }

    /// Returns the new title, if supplied.
    #[must_use]
    pub const fn title(&self) -> Option<&TaskTitle> {
        self.title.as_ref()
    }

    /// Returns the new description, if supplied.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the new status, if supplied.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the due-date change, if supplied.
    #[must_use]
    pub const fn due_date(&self) -> Option<DueDateChange> {
        self.due_date
    }

    /// Returns `true` when no field is present.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.due_date.is_none()
    }

    /// Describes each present field, ordered title, description, status,
    /// due date.
    #[must_use]
    pub fn change_fragments(&self) -> Vec<String> {
        let mut fragments = Vec::new();
        if let Some(title) = &self.title {
            fragments.push(format!("changed title to '{title}'"));
        }
        if self.description.is_some() {
            fragments.push("updated description".to_owned());
        }
        if let Some(status) = self.status {
            fragments.push(format!("changed status to '{status}'"));
        }
        if let Some(change) = self.due_date {
            fragments.push(change.describe());
        }
        fragments
    }
}
