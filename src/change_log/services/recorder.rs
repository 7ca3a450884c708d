//! Best-effort change-log recording and history retrieval.

use crate::{
    change_log::{
        domain::{ChangeAction, ChangeLogEntry},
        ports::{ChangeLogRepository, ChangeLogRepositoryResult},
    },
    identity::UserId,
    task::domain::TaskId,
};
use mockable::Clock;
use std::sync::Arc;

/// Result of a best-effort append.
///
/// Recording never fails the operation it accompanies, so callers get an
/// outcome rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// The entry was persisted.
    Recorded(ChangeLogEntry),
    /// The write failed and was dropped after logging a warning.
    Dropped,
}

impl RecordOutcome {
    /// Returns `true` when the entry was persisted.
    #[must_use]
    pub const fn is_recorded(&self) -> bool {
        matches!(self, Self::Recorded(_))
    }
}

/// Appends audit entries as a post-commit hook and serves task history.
pub struct ChangeLogRecorder<L, C>
where
    L: ChangeLogRepository + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<L>,
    clock: Arc<C>,
}

impl<L, C> Clone for ChangeLogRecorder<L, C>
where
    L: ChangeLogRepository + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<L, C> ChangeLogRecorder<L, C>
where
    L: ChangeLogRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a recorder over `repository`.
    #[must_use]
    pub const fn new(repository: Arc<L>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Appends one entry for `task_id`.
    ///
    /// Storage failures are logged at `warn` and reported as
    /// [`RecordOutcome::Dropped`].
    pub async fn record(
        &self,
        task_id: TaskId,
        user_id: UserId,
        action: ChangeAction,
        details: impl Into<String> + Send,
    ) -> RecordOutcome {
        let entry = ChangeLogEntry::new(task_id, user_id, action, details, &*self.clock);
        match self.repository.append(&entry).await {
            Ok(()) => {
                tracing::debug!(
                    task_id = %task_id.into_inner(),
                    action = %entry.action(),
                    "change log entry recorded"
                );
                RecordOutcome::Recorded(entry)
            }
            Err(err) => {
                tracing::warn!(
                    task_id = %task_id.into_inner(),
                    user_id = %user_id,
                    action = %entry.action(),
                    error = %err,
                    "failed to record change log entry"
                );
                RecordOutcome::Dropped
            }
        }
    }

    /// Returns every entry for `task_id`, most recent first.
    ///
    /// # Errors
    ///
    /// Returns the repository error when the history cannot be read.
    pub async fn history(&self, task_id: TaskId) -> ChangeLogRepositoryResult<Vec<ChangeLogEntry>> {
        self.repository.list_for_task(task_id).await
    }
}
