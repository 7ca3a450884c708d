//! Task mutation and listing service.
//!
//! Every mutating operation validates its input before touching storage,
//! checks ownership with a single lookup that also yields the title used in
//! log wording, issues an owner-scoped write, and then records a change-log
//! entry through the best-effort [`ChangeLogRecorder`].

use crate::{
    change_log::{
        domain::{ChangeAction, ChangeLogEntry, format_change_details},
        ports::{ChangeLogRepository, ChangeLogRepositoryError},
        services::ChangeLogRecorder,
    },
    identity::UserId,
    ownership::{OwnershipError, authorize},
    task::{
        domain::{Task, TaskId, TaskTitle},
        ports::{TaskListing, TaskRepository, TaskRepositoryError},
        services::{CreateTaskRequest, UpdateTaskRequest},
    },
    validation::{Page, ValidationError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// A request field failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An update request carried no fields.
    #[error("no fields to update")]
    NoFieldsToUpdate,

    /// The task does not exist.
    #[error("{0} not found")]
    NotFound(TaskId),

    /// The task belongs to another user.
    #[error("user {actor} does not own {id}")]
    Forbidden {
        /// Task the user tried to modify.
        id: TaskId,
        /// Acting user.
        actor: UserId,
    },

    /// Task storage failed.
    #[error(transparent)]
    Repository(TaskRepositoryError),

    /// Change-log storage failed while reading history.
    #[error(transparent)]
    ChangeLog(#[from] ChangeLogRepositoryError),
}

impl From<OwnershipError<TaskId>> for TaskServiceError {
    fn from(err: OwnershipError<TaskId>) -> Self {
        match err {
            OwnershipError::NotFound(id) => Self::NotFound(id),
            OwnershipError::Forbidden { id, actor } => Self::Forbidden { id, actor },
        }
    }
}

impl From<TaskRepositoryError> for TaskServiceError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::NotFound(id),
            other => Self::Repository(other),
        }
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Outcome of a partial update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskUpdate {
    /// The refreshed task.
    pub task: Task,
    /// One fragment per changed field, in title, description, status, due
    /// date order.
    pub changes: Vec<String>,
}

impl TaskUpdate {
    /// Returns the change fragments joined into one sentence.
    #[must_use]
    pub fn details(&self) -> String {
        format_change_details(&self.changes)
    }
}

/// Task orchestration service.
pub struct TaskService<T, L, C>
where
    T: TaskRepository + ?Sized,
    L: ChangeLogRepository + ?Sized,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    recorder: ChangeLogRecorder<L, C>,
    clock: Arc<C>,
}

impl<T, L, C> Clone for TaskService<T, L, C>
where
    T: TaskRepository + ?Sized,
    L: ChangeLogRepository + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
            recorder: self.recorder.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<T, L, C> TaskService<T, L, C>
where
    T: TaskRepository + ?Sized,
    L: ChangeLogRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub fn new(tasks: Arc<T>, change_logs: Arc<L>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            recorder: ChangeLogRecorder::new(change_logs, Arc::clone(&clock)),
            clock,
        }
    }

    /// Creates a task owned by `actor`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] for invalid input, or
    /// [`TaskServiceError::Repository`] when the task cannot be stored.
    pub async fn create(&self, actor: UserId, request: CreateTaskRequest) -> TaskServiceResult<Task> {
        let draft = request.into_draft()?;
        let task = Task::new(draft, actor, &*self.clock);
        self.tasks.store(&task).await?;
        tracing::info!(task_id = %task.id().into_inner(), user_id = %actor, "task created");

        self.recorder
            .record(
                task.id(),
                actor,
                ChangeAction::Created,
                format!("Created task: {}", task.title()),
            )
            .await;
        Ok(task)
    }

    /// Fetches a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when no task has `id`.
    pub async fn get(&self, id: TaskId) -> TaskServiceResult<Task> {
        self.tasks
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::NotFound(id))
    }

    /// Lists unarchived tasks, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when storage fails.
    pub async fn list(&self, page: Page) -> TaskServiceResult<Vec<Task>> {
        Ok(self.tasks.list(TaskListing::Active(page)).await?)
    }

    /// Lists archived tasks, most recently updated first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when storage fails.
    pub async fn list_archived(&self, page: Page) -> TaskServiceResult<Vec<Task>> {
        Ok(self.tasks.list(TaskListing::Archived(page)).await?)
    }

    /// Applies the fields present in `request` to a task owned by `actor`.
    ///
    /// Validation and the empty-request check run before any storage
    /// access.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Validation`] or
    /// [`TaskServiceError::NoFieldsToUpdate`] for bad input,
    /// [`TaskServiceError::NotFound`] or [`TaskServiceError::Forbidden`]
    /// when the ownership check fails, and
    /// [`TaskServiceError::Repository`] when storage fails.
    pub async fn update(
        &self,
        id: TaskId,
        actor: UserId,
        request: UpdateTaskRequest,
    ) -> TaskServiceResult<TaskUpdate> {
        let patch = request.into_patch()?;
        if patch.is_empty() {
            return Err(TaskServiceError::NoFieldsToUpdate);
        }
        self.authorize(id, actor).await?;

        let task = self
            .tasks
            .apply_patch(id, actor, &patch, crate::timestamp::now(&*self.clock))
            .await?;
        let update = TaskUpdate {
            task,
            changes: patch.change_fragments(),
        };
        tracing::info!(
            task_id = %id.into_inner(),
            user_id = %actor,
            changed = update.changes.len(),
            "task updated"
        );

        self.recorder
            .record(id, actor, ChangeAction::Updated, update.details())
            .await;
        Ok(update)
    }

    /// Moves a task owned by `actor` to the archive.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] or
    /// [`TaskServiceError::Forbidden`] when the ownership check fails.
    pub async fn archive(&self, id: TaskId, actor: UserId) -> TaskServiceResult<Task> {
        self.set_archived(id, actor, true).await
    }

    /// Restores an archived task owned by `actor`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] or
    /// [`TaskServiceError::Forbidden`] when the ownership check fails.
    pub async fn unarchive(&self, id: TaskId, actor: UserId) -> TaskServiceResult<Task> {
        self.set_archived(id, actor, false).await
    }

    /// Deletes a task owned by `actor`, cascading to its comments and
    /// change log.
    ///
    /// The deletion is logged before the row is removed, so the entry is
    /// itself removed by the cascade.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] or
    /// [`TaskServiceError::Forbidden`] when the ownership check fails, and
    /// [`TaskServiceError::NotFound`] when a concurrent delete wins.
    pub async fn delete(&self, id: TaskId, actor: UserId) -> TaskServiceResult<()> {
        let title = self.authorize(id, actor).await?;
        self.recorder
            .record(id, actor, ChangeAction::Deleted, format!("Deleted task: {title}"))
            .await;

        self.tasks.delete(id, actor).await?;
        tracing::info!(task_id = %id.into_inner(), user_id = %actor, "task deleted");
        Ok(())
    }

    /// Returns the change log of a task, most recent first.
    ///
    /// Unknown tasks yield an empty history.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::ChangeLog`] when storage fails.
    pub async fn history(&self, id: TaskId) -> TaskServiceResult<Vec<ChangeLogEntry>> {
        Ok(self.recorder.history(id).await?)
    }

    async fn set_archived(
        &self,
        id: TaskId,
        actor: UserId,
        archived: bool,
    ) -> TaskServiceResult<Task> {
        let title = self.authorize(id, actor).await?;
        let task = self
            .tasks
            .set_archived(id, actor, archived, crate::timestamp::now(&*self.clock))
            .await?;

        let (action, details) = if archived {
            (ChangeAction::Archived, format!("Archived task: {title}"))
        } else {
            (ChangeAction::Unarchived, format!("Restored task: {title}"))
        };
        tracing::info!(task_id = %id.into_inner(), user_id = %actor, %action, "task archive flag set");
        self.recorder.record(id, actor, action, details).await;
        Ok(task)
    }

    async fn authorize(&self, id: TaskId, actor: UserId) -> TaskServiceResult<TaskTitle> {
        let lookup = self.tasks.find_owner(id).await?;
        Ok(authorize(id, lookup, actor)?)
    }
}
