//! In-memory task repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    identity::UserId,
    ownership::OwnedResource,
    storage::memory::{InMemoryDatabase, newest_first},
    task::{
        domain::{Task, TaskId, TaskPatch, TaskTitle},
        ports::{TaskListing, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
    },
};

/// Task repository over the shared [`InMemoryDatabase`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    database: InMemoryDatabase,
}

impl InMemoryTaskRepository {
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

/// Finds a task owned by `owner` and applies `mutate` to it.
fn mutate_owned<F>(
    database: &InMemoryDatabase,
    id: TaskId,
    owner: UserId,
    mutate: F,
) -> TaskRepositoryResult<Task>
where
    F: FnOnce(&mut Task),
{
    let mut tables = database.write().map_err(TaskRepositoryError::persistence)?;
    let task = tables
        .task_mut(id)
        .filter(|task| task.creator_id() == owner)
        .ok_or(TaskRepositoryError::NotFound(id))?;
    mutate(task);
    let updated = task.clone();
    Ok(tables.named_task(&updated))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut tables = self
            .database
            .write()
            .map_err(TaskRepositoryError::persistence)?;
        if tables.task(task.id()).is_some() {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        tables.tasks.push(task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let tables = self
            .database
            .read()
            .map_err(TaskRepositoryError::persistence)?;
        Ok(tables.task(id).map(|task| tables.named_task(task)))
    }

    async fn find_owner(
        &self,
        id: TaskId,
    ) -> TaskRepositoryResult<Option<OwnedResource<TaskTitle>>> {
        let tables = self
            .database
            .read()
            .map_err(TaskRepositoryError::persistence)?;
        Ok(tables
            .task(id)
            .map(|task| OwnedResource::new(task.creator_id(), task.title().clone())))
    }

    async fn list(&self, listing: TaskListing) -> TaskRepositoryResult<Vec<Task>> {
        let tables = self
            .database
            .read()
            .map_err(TaskRepositoryError::persistence)?;
        let archived = listing.archived();
        let matching = tables
            .tasks
            .iter()
            .filter(|task| task.is_archived() == archived)
            .map(|task| tables.named_task(task));
        let ordered = match listing {
            TaskListing::Active(_) => newest_first(matching, Task::created_at),
            TaskListing::Archived(_) => newest_first(matching, Task::updated_at),
        };
        let (skip, take) = listing.page().as_range_bounds();
        Ok(ordered.into_iter().skip(skip).take(take).collect())
    }

    async fn apply_patch(
        &self,
        id: TaskId,
        owner: UserId,
        patch: &TaskPatch,
        updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Task> {
        mutate_owned(&self.database, id, owner, |task| {
            task.apply_patch(patch, updated_at);
        })
    }

    async fn set_archived(
        &self,
        id: TaskId,
        owner: UserId,
        archived: bool,
        updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Task> {
        mutate_owned(&self.database, id, owner, |task| {
            task.set_archived(archived, updated_at);
        })
    }

    async fn delete(&self, id: TaskId, owner: UserId) -> TaskRepositoryResult<()> {
        let mut tables = self
            .database
            .write()
            .map_err(TaskRepositoryError::persistence)?;
        let owned = tables
            .task(id)
            .is_some_and(|task| task.creator_id() == owner);
        if !owned || !tables.delete_task_cascade(id) {
            return Err(TaskRepositoryError::NotFound(id));
        }
        Ok(())
    }
}
