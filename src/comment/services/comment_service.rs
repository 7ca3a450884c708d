//! Comment creation, editing, deletion, and listing.

use crate::{
    change_log::{domain::ChangeAction, ports::ChangeLogRepository, services::ChangeLogRecorder},
    comment::{
        domain::{Comment, CommentContent, CommentId},
        ports::{CommentRepository, CommentRepositoryError},
    },
    identity::UserId,
    ownership::{OwnershipError, authorize},
    task::{
        domain::TaskId,
        ports::{TaskRepository, TaskRepositoryError},
    },
    validation::ValidationError,
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for comment operations.
#[derive(Debug, Error)]
pub enum CommentServiceError {
    /// The comment content failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The parent task does not exist.
    #[error("{0} not found")]
    TaskNotFound(TaskId),

    /// The comment does not exist.
    #[error("{0} not found")]
    NotFound(CommentId),

    /// The comment was written by another user.
    #[error("user {actor} did not write {id}")]
    Forbidden {
        /// Comment the user tried to modify.
        id: CommentId,
        /// Acting user.
        actor: UserId,
    },

    /// Comment storage failed.
    #[error(transparent)]
    Repository(CommentRepositoryError),

    /// Task lookup failed.
    #[error(transparent)]
    TaskRepository(#[from] TaskRepositoryError),
}

impl From<OwnershipError<CommentId>> for CommentServiceError {
    fn from(err: OwnershipError<CommentId>) -> Self {
        match err {
            OwnershipError::NotFound(id) => Self::NotFound(id),
            OwnershipError::Forbidden { id, actor } => Self::Forbidden { id, actor },
        }
    }
}

impl From<CommentRepositoryError> for CommentServiceError {
    fn from(err: CommentRepositoryError) -> Self {
        match err {
            CommentRepositoryError::TaskNotFound(task_id) => Self::TaskNotFound(task_id),
            CommentRepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for comment service operations.
pub type CommentServiceResult<T> = Result<T, CommentServiceError>;

/// Comment orchestration service.
///
/// Every mutation appends a fixed-wording entry to the parent task's change
/// log after the write succeeds.
pub struct CommentService<M, T, L, C>
where
    M: CommentRepository + ?Sized,
    T: TaskRepository + ?Sized,
    L: ChangeLogRepository + ?Sized,
    C: Clock + Send + Sync,
{
    comments: Arc<M>,
    tasks: Arc<T>,
    recorder: ChangeLogRecorder<L, C>,
    clock: Arc<C>,
}

impl<M, T, L, C> Clone for CommentService<M, T, L, C>
where
    M: CommentRepository + ?Sized,
    T: TaskRepository + ?Sized,
    L: ChangeLogRepository + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            comments: Arc::clone(&self.comments),
            tasks: Arc::clone(&self.tasks),
            recorder: self.recorder.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<M, T, L, C> CommentService<M, T, L, C>
where
    M: CommentRepository + ?Sized,
    T: TaskRepository + ?Sized,
    L: ChangeLogRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new comment service.
    #[must_use]
    pub fn new(comments: Arc<M>, tasks: Arc<T>, change_logs: Arc<L>, clock: Arc<C>) -> Self {
        Self {
            comments,
            tasks,
            recorder: ChangeLogRecorder::new(change_logs, Arc::clone(&clock)),
            clock,
        }
    }

    /// Lists the comments on a task, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`CommentServiceError::TaskNotFound`] when the task does not
    /// exist.
    pub async fn list_for_task(&self, task_id: TaskId) -> CommentServiceResult<Vec<Comment>> {
        self.ensure_task_exists(task_id).await?;
        Ok(self.comments.list_for_task(task_id).await?)
    }

    /// Adds a comment by `actor` to an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`CommentServiceError::Validation`] for invalid content and
    /// [`CommentServiceError::TaskNotFound`] when the task does not exist.
    pub async fn create(
        &self,
        task_id: TaskId,
        actor: UserId,
        content: impl Into<String> + Send,
    ) -> CommentServiceResult<Comment> {
        let body = CommentContent::new(content)?;
        self.ensure_task_exists(task_id).await?;

        let comment = Comment::new(task_id, actor, body, &*self.clock);
        self.comments.store(&comment).await?;
        tracing::info!(
            comment_id = %comment.id().into_inner(),
            task_id = %task_id.into_inner(),
            user_id = %actor,
            "comment created"
        );

        self.recorder
            .record(task_id, actor, ChangeAction::Commented, "Added a comment")
            .await;
        Ok(comment)
    }

    /// Replaces the content of a comment written by `actor`.
    ///
    /// # Errors
    ///
    /// Returns [`CommentServiceError::Validation`] for invalid content,
    /// [`CommentServiceError::NotFound`] when the comment does not exist, and
    /// [`CommentServiceError::Forbidden`] when `actor` is not the author.
    pub async fn update(
        &self,
        id: CommentId,
        actor: UserId,
        content: impl Into<String> + Send,
    ) -> CommentServiceResult<Comment> {
        let body = CommentContent::new(content)?;
        let task_id = self.authorize(id, actor).await?;

        let comment = self
            .comments
            .update_content(id, actor, &body, crate::timestamp::now(&*self.clock))
            .await?;
        tracing::info!(comment_id = %id.into_inner(), user_id = %actor, "comment updated");

        self.recorder
            .record(task_id, actor, ChangeAction::UpdatedComment, "Updated a comment")
            .await;
        Ok(comment)
    }

    /// Deletes a comment written by `actor`.
    ///
    /// # Errors
    ///
    /// Returns [`CommentServiceError::NotFound`] when the comment does not
    /// exist and [`CommentServiceError::Forbidden`] when `actor` is not the
    /// author.
    pub async fn delete(&self, id: CommentId, actor: UserId) -> CommentServiceResult<()> {
        let task_id = self.authorize(id, actor).await?;
        self.comments.delete(id, actor).await?;
        tracing::info!(comment_id = %id.into_inner(), user_id = %actor, "comment deleted");

        self.recorder
            .record(task_id, actor, ChangeAction::DeletedComment, "Deleted a comment")
            .await;
        Ok(())
    }

    async fn ensure_task_exists(&self, task_id: TaskId) -> CommentServiceResult<()> {
        match self.tasks.find_owner(task_id).await? {
            Some(_) => Ok(()),
            None => Err(CommentServiceError::TaskNotFound(task_id)),
        }
    }

    async fn authorize(&self, id: CommentId, actor: UserId) -> CommentServiceResult<TaskId> {
        let lookup = self.comments.find_owner(id).await?;
        Ok(authorize(id, lookup, actor)?)
    }
}
