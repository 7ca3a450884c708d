//! Repository port for comment persistence.

use crate::{
    comment::domain::{Comment, CommentContent, CommentId},
    identity::UserId,
    ownership::OwnedResource,
    task::domain::TaskId,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for comment repository operations.
pub type CommentRepositoryResult<T> = Result<T, CommentRepositoryError>;

/// Comment persistence contract.
///
/// Edits and deletes are scoped to the author; a write that affects no row
/// reports [`CommentRepositoryError::NotFound`].
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Stores a new comment.
    ///
    /// # Errors
    ///
    /// Returns [`CommentRepositoryError::TaskNotFound`] when the parent task
    /// does not exist.
    async fn store(&self, comment: &Comment) -> CommentRepositoryResult<()>;

    /// Looks up the author and parent task of a comment.
    ///
    /// Returns `None` when the comment does not exist.
    async fn find_owner(
        &self,
        id: CommentId,
    ) -> CommentRepositoryResult<Option<OwnedResource<TaskId>>>;

    /// Returns every comment on `task_id`, oldest first.
    async fn list_for_task(&self, task_id: TaskId) -> CommentRepositoryResult<Vec<Comment>>;

    /// Replaces the body of a comment written by `author`.
    ///
    /// # Errors
    ///
    /// Returns [`CommentRepositoryError::NotFound`] when no comment with `id`
    /// was written by `author`.
    async fn update_content(
        &self,
        id: CommentId,
        author: UserId,
        content: &CommentContent,
        updated_at: DateTime<Utc>,
    ) -> CommentRepositoryResult<Comment>;

    /// Deletes a comment written by `author`.
    ///
    /// # Errors
    ///
    /// Returns [`CommentRepositoryError::NotFound`] when no comment with `id`
    /// was written by `author`.
    async fn delete(&self, id: CommentId, author: UserId) -> CommentRepositoryResult<()>;
}

/// Errors returned by comment repository implementations.
#[derive(Debug, Clone, Error)]
pub enum CommentRepositoryError {
    /// The parent task does not exist.
    #[error("{0} not found")]
    TaskNotFound(TaskId),

    /// A comment with the same identifier already exists.
    #[error("duplicate comment identifier: {0}")]
    DuplicateComment(CommentId),

    /// The comment was not found, or a conditional write matched no row.
    #[error("{0} not found")]
    NotFound(CommentId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CommentRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
