//! Change-log entry aggregate.

use super::ChangeAction;
use crate::{identity::UserId, task::domain::TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a change-log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeLogId(Uuid);

impl ChangeLogId {
    /// Creates a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for ChangeLogId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChangeLogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One audit record. Entries are never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeLogEntry {
    id: ChangeLogId,
    task_id: TaskId,
    user_id: UserId,
    user_name: Option<String>,
    action: ChangeAction,
    details: String,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedChangeLogData {
    /// Persisted identifier.
    pub id: ChangeLogId,
    /// Task the entry belongs to.
    pub task_id: TaskId,
    /// Acting user.
    pub user_id: UserId,
    /// Display name of the acting user, when the store knows it.
    pub user_name: Option<String>,
    /// Action tag.
    pub action: ChangeAction,
    /// Human-readable details.
    pub details: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl ChangeLogEntry {
    /// Creates an entry timestamped by `clock`.
    #[must_use]
    pub fn new(
        task_id: TaskId,
        user_id: UserId,
        action: ChangeAction,
        details: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: ChangeLogId::new(),
            task_id,
            user_id,
            user_name: None,
            action,
            details: details.into(),
            created_at: crate::timestamp::now(clock),
        }
    }

    /// Reconstructs an entry from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedChangeLogData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            user_id: data.user_id,
            user_name: data.user_name,
            action: data.action,
            details: data.details,
            created_at: data.created_at,
        }
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> ChangeLogId {
        self.id
    }

    /// Returns the task the entry belongs to.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the acting user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the acting user's display name, when it was loaded.
    #[must_use]
    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    /// Attaches the acting user's display name.
    #[must_use]
    pub fn with_user_name(mut self, name: Option<String>) -> Self {
        self.user_name = name;
        self
    }

    /// Returns the action tag.
    #[must_use]
    pub const fn action(&self) -> &ChangeAction {
        &self.action
    }

    /// Returns the details sentence.
    #[must_use]
    pub fn details(&self) -> &str {
        &self.details
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
