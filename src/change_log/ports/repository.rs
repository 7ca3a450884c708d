//! Repository port for change-log persistence.

use crate::{change_log::domain::ChangeLogEntry, task::domain::TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for change-log repository operations.
pub type ChangeLogRepositoryResult<T> = Result<T, ChangeLogRepositoryError>;

/// Change-log persistence contract. Entries are append-only.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChangeLogRepository: Send + Sync {
    /// Appends an entry.
    ///
    /// # Errors
    ///
    /// Returns [`ChangeLogRepositoryError::TaskNotFound`] when the task no
    /// longer exists, or [`ChangeLogRepositoryError::Persistence`] on
    /// storage failure.
    async fn append(&self, entry: &ChangeLogEntry) -> ChangeLogRepositoryResult<()>;

    /// Returns every entry for `task_id`, most recent first.
    async fn list_for_task(&self, task_id: TaskId)
    -> ChangeLogRepositoryResult<Vec<ChangeLogEntry>>;
}

/// Errors returned by change-log repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ChangeLogRepositoryError {
    /// The referenced task does not exist.
    #[error("{0} not found")]
    TaskNotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ChangeLogRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
