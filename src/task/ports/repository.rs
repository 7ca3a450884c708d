//! Repository port for task persistence.

use crate::{
    identity::UserId,
    ownership::OwnedResource,
    task::domain::{Task, TaskId, TaskPatch, TaskTitle},
    validation::Page,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Which slice of tasks a listing returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskListing {
    /// Unarchived tasks, newest-created first.
    Active(Page),
    /// Archived tasks, most recently updated first.
    Archived(Page),
}

impl TaskListing {
    /// Returns the requested page window.
    #[must_use]
    pub const fn page(self) -> Page {
        match self {
            Self::Active(page) | Self::Archived(page) => page,
        }
    }

    /// Returns the archived flag rows must carry to be listed.
    #[must_use]
    pub const fn archived(self) -> bool {
        matches!(self, Self::Archived(_))
    }
}

/// Task persistence contract.
///
/// Mutating operations take the acting owner and only touch a row whose
/// creator matches; a write that affects no row reports
/// [`TaskRepositoryError::NotFound`].
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Looks up the creator and title of a task in a single read.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_owner(&self, id: TaskId)
    -> TaskRepositoryResult<Option<OwnedResource<TaskTitle>>>;

    /// Returns one page of tasks filtered by archived flag.
    async fn list(&self, listing: TaskListing) -> TaskRepositoryResult<Vec<Task>>;

    /// Writes the fields present in `patch` and returns the refreshed task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when no task with `id` is
    /// owned by `owner`.
    async fn apply_patch(
        &self,
        id: TaskId,
        owner: UserId,
        patch: &TaskPatch,
        updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Task>;

    /// Sets the archived flag and returns the refreshed task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when no task with `id` is
    /// owned by `owner`.
    async fn set_archived(
        &self,
        id: TaskId,
        owner: UserId,
        archived: bool,
        updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Task>;

    /// Deletes a task together with its comments and change-log entries.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when no task with `id` is
    /// owned by `owner`.
    async fn delete(&self, id: TaskId, owner: UserId) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found, or a conditional write matched no row.
    #[error("{0} not found")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
