//! `PostgreSQL` repository implementation for task storage.

use super::models::{NewTaskRow, TaskChangeset, TaskRow};
use crate::{
    identity::UserId,
    ownership::OwnedResource,
    storage::postgres::{
        PgPool, get_conn_with, is_unique_violation, run_blocking_with,
        schema::{tasks, users},
        user_name,
    },
    task::{
        domain::{PersistedTaskData, Task, TaskId, TaskPatch, TaskStatus, TaskTitle},
        ports::{TaskListing, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
    },
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection = get_conn_with(&pool, TaskRepositoryError::persistence)?;
                f(&mut connection)
            },
            TaskRepositoryError::persistence,
        )
        .await
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| {
                    if is_unique_violation(&err) {
                        TaskRepositoryError::DuplicateTask(task_id)
                    } else {
                        TaskRepositoryError::persistence(err)
                    }
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .left_join(users::table)
                .filter(tasks::id.eq(id.into_inner()))
                .select((TaskRow::as_select(), users::name.nullable()))
                .first::<(TaskRow, Option<String>)>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(|(task_row, name)| row_to_task(task_row, name))
                .transpose()
        })
        .await
    }

    async fn find_owner(
        &self,
        id: TaskId,
    ) -> TaskRepositoryResult<Option<OwnedResource<TaskTitle>>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select((tasks::creator_id, tasks::title))
                .first::<(uuid::Uuid, String)>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(|(creator_id, title)| {
                let persisted_title =
                    TaskTitle::new(title).map_err(TaskRepositoryError::persistence)?;
                Ok(OwnedResource::new(
                    UserId::from_uuid(creator_id),
                    persisted_title,
                ))
            })
            .transpose()
        })
        .await
    }

    async fn list(&self, listing: TaskListing) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let page = listing.page();
            let query = tasks::table
                .left_join(users::table)
                .filter(tasks::archived.eq(listing.archived()))
                .select((TaskRow::as_select(), users::name.nullable()))
                .limit(page.limit())
                .offset(page.offset());
            let rows = match listing {
                TaskListing::Active(_) => query
                    .order(tasks::created_at.desc())
                    .load::<(TaskRow, Option<String>)>(connection),
                TaskListing::Archived(_) => query
                    .order(tasks::updated_at.desc())
                    .load::<(TaskRow, Option<String>)>(connection),
            }
            .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter()
                .map(|(task_row, name)| row_to_task(task_row, name))
                .collect()
        })
        .await
    }

    async fn apply_patch(
        &self,
        id: TaskId,
        owner: UserId,
        patch: &TaskPatch,
        updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Task> {
        let changeset = to_changeset(patch, updated_at);
        self.run_blocking(move |connection| {
            let row = diesel::update(owned_task(id, owner))
                .set(&changeset)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?
                .ok_or(TaskRepositoryError::NotFound(id))?;
            let name = user_name(connection, row.creator_id)
                .map_err(TaskRepositoryError::persistence)?;
            row_to_task(row, name)
        })
        .await
    }

    async fn set_archived(
        &self,
        id: TaskId,
        owner: UserId,
        archived: bool,
        updated_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Task> {
        self.run_blocking(move |connection| {
            let row = diesel::update(owned_task(id, owner))
                .set((tasks::archived.eq(archived), tasks::updated_at.eq(updated_at)))
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?
                .ok_or(TaskRepositoryError::NotFound(id))?;
            let name = user_name(connection, row.creator_id)
                .map_err(TaskRepositoryError::persistence)?;
            row_to_task(row, name)
        })
        .await
    }

    async fn delete(&self, id: TaskId, owner: UserId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(owned_task(id, owner))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if affected == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

/// Selects the task row only when it is owned by `owner`.
fn owned_task(
    id: TaskId,
    owner: UserId,
) -> diesel::dsl::Filter<
    diesel::dsl::Filter<tasks::table, diesel::dsl::Eq<tasks::id, uuid::Uuid>>,
    diesel::dsl::Eq<tasks::creator_id, uuid::Uuid>,
> {
    tasks::table
        .filter(tasks::id.eq(id.into_inner()))
        .filter(tasks::creator_id.eq(owner.into_inner()))
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().to_owned(),
        status: task.status().as_str().to_owned(),
        creator_id: task.creator_id().into_inner(),
        due_date: task.due_date(),
        archived: task.is_archived(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn to_changeset(patch: &TaskPatch, updated_at: DateTime<Utc>) -> TaskChangeset {
    TaskChangeset {
        title: patch.title().map(|title| title.as_str().to_owned()),
        description: patch.description().map(str::to_owned),
        status: patch.status().map(|status| status.as_str().to_owned()),
        due_date: patch.due_date().map(|change| change.into_option()),
        updated_at,
    }
}

fn row_to_task(row: TaskRow, creator_name: Option<String>) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title: persisted_title,
        description,
        status: persisted_status,
        creator_id,
        due_date,
        archived,
        created_at,
        updated_at,
    } = row;

    let title = TaskTitle::new(persisted_title).map_err(TaskRepositoryError::persistence)?;
    let status = TaskStatus::try_from(persisted_status.as_str())
        .map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        title,
        description,
        status,
        creator_id: UserId::from_uuid(creator_id),
        creator_name,
        due_date,
        archived,
        created_at,
        updated_at,
    }))
}
