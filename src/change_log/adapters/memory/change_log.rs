//! In-memory change-log repository.

use async_trait::async_trait;

use crate::{
    change_log::{
        domain::ChangeLogEntry,
        ports::{ChangeLogRepository, ChangeLogRepositoryError, ChangeLogRepositoryResult},
    },
    storage::memory::{InMemoryDatabase, newest_first},
    task::domain::TaskId,
};

/// Change-log repository over the shared [`InMemoryDatabase`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryChangeLogRepository {
    database: InMemoryDatabase,
}

impl InMemoryChangeLogRepository {
    /// Creates a repository over its own empty database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository sharing `database` with other repositories.
    #[must_use]
    pub const fn with_database(database: InMemoryDatabase) -> Self {
        Self { database }
    }
}

#[async_trait]
impl ChangeLogRepository for InMemoryChangeLogRepository {
    async fn append(&self, entry: &ChangeLogEntry) -> ChangeLogRepositoryResult<()> {
        let mut tables = self
            .database
            .write()
            .map_err(ChangeLogRepositoryError::persistence)?;
        if tables.task(entry.task_id()).is_none() {
            return Err(ChangeLogRepositoryError::TaskNotFound(entry.task_id()));
        }
        tables.change_logs.push(entry.clone());
        Ok(())
    }

    async fn list_for_task(
        &self,
        task_id: TaskId,
    ) -> ChangeLogRepositoryResult<Vec<ChangeLogEntry>> {
        let tables = self
            .database
            .read()
            .map_err(ChangeLogRepositoryError::persistence)?;
        let entries = tables
            .change_logs
            .iter()
            .filter(|entry| entry.task_id() == task_id)
            .map(|entry| {
                entry
                    .clone()
                    .with_user_name(tables.user_name(entry.user_id()))
            });
        Ok(newest_first(entries, ChangeLogEntry::created_at))
    }
}
