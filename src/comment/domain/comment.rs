//! Comment aggregate.

use super::{CommentContent, CommentId};
use crate::{identity::UserId, task::domain::TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A comment left on a task by its author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    task_id: TaskId,
    user_id: UserId,
    user_name: Option<String>,
    content: CommentContent,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedCommentData {
    /// Persisted identifier.
    pub id: CommentId,
    /// Parent task.
    pub task_id: TaskId,
    /// Authoring user.
    pub user_id: UserId,
    /// Display name of the author, when the store knows it.
    pub user_name: Option<String>,
    /// Persisted body.
    pub content: CommentContent,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a new comment on `task_id` authored by `user_id`.
    #[must_use]
    pub fn new(
        task_id: TaskId,
        user_id: UserId,
        content: CommentContent,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = crate::timestamp::now(clock);
        Self {
            id: CommentId::new(),
            task_id,
            user_id,
            user_name: None,
            content,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a comment from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedCommentData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            user_id: data.user_id,
            user_name: data.user_name,
            content: data.content,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the comment identifier.
    #[must_use]
    pub const fn id(&self) -> CommentId {
        self.id
    }

    /// Returns the parent task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the author.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the author's display name, when it was loaded.
    #[must_use]
    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    /// Attaches the author's display name.
    #[must_use]
    pub fn with_user_name(mut self, name: Option<String>) -> Self {
        self.user_name = name;
        self
    }

    /// Returns the body.
    #[must_use]
    pub const fn content(&self) -> &CommentContent {
        &self.content
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

    /// Replaces the body.
    pub fn edit(&mut self, content: CommentContent, updated_at: DateTime<Utc>) {
        self.content = content;
        self.updated_at = updated_at;
    }
}
