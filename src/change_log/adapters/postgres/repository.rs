//! `PostgreSQL` repository implementation for change-log storage.

use super::models::{ChangeLogRow, NewChangeLogRow};
use crate::{
    change_log::{
        domain::{ChangeAction, ChangeLogEntry, ChangeLogId, PersistedChangeLogData},
        ports::{ChangeLogRepository, ChangeLogRepositoryError, ChangeLogRepositoryResult},
    },
    identity::UserId,
    storage::postgres::{
        CHANGE_LOGS_TASK_FKEY, PgPool, get_conn_with, is_foreign_key_violation, run_blocking_with,
        schema::{change_logs, users},
    },
    task::domain::TaskId,
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;

/// `PostgreSQL`-backed change-log repository.
#[derive(Debug, Clone)]
pub struct PostgresChangeLogRepository {
    pool: PgPool,
}

impl PostgresChangeLogRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ChangeLogRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ChangeLogRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection = get_conn_with(&pool, ChangeLogRepositoryError::persistence)?;
                f(&mut connection)
            },
            ChangeLogRepositoryError::persistence,
        )
        .await
    }
}

#[async_trait]
impl ChangeLogRepository for PostgresChangeLogRepository {
    async fn append(&self, entry: &ChangeLogEntry) -> ChangeLogRepositoryResult<()> {
        let task_id = entry.task_id();
        let new_row = NewChangeLogRow {
            id: entry.id().into_inner(),
            task_id: task_id.into_inner(),
            user_id: entry.user_id().into_inner(),
            action: entry.action().as_str().to_owned(),
            details: entry.details().to_owned(),
            created_at: entry.created_at(),
        };

        self.run_blocking(move |connection| {
            diesel::insert_into(change_logs::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| {
                    if is_foreign_key_violation(&err, CHANGE_LOGS_TASK_FKEY) {
                        ChangeLogRepositoryError::TaskNotFound(task_id)
                    } else {
                        ChangeLogRepositoryError::persistence(err)
                    }
                })?;
            Ok(())
        })
        .await
    }

    async fn list_for_task(
        &self,
        task_id: TaskId,
    ) -> ChangeLogRepositoryResult<Vec<ChangeLogEntry>> {
        self.run_blocking(move |connection| {
            let rows = change_logs::table
                .left_join(users::table)
                .filter(change_logs::task_id.eq(task_id.into_inner()))
                .order((change_logs::created_at.desc(), change_logs::seq.desc()))
                .select((ChangeLogRow::as_select(), users::name.nullable()))
                .load::<(ChangeLogRow, Option<String>)>(connection)
                .map_err(ChangeLogRepositoryError::persistence)?;
            Ok(rows
                .into_iter()
                .map(|(entry_row, name)| row_to_entry(entry_row, name))
                .collect())
        })
        .await
    }
}

fn row_to_entry(row: ChangeLogRow, user_name: Option<String>) -> ChangeLogEntry {
    ChangeLogEntry::from_persisted(PersistedChangeLogData {
        id: ChangeLogId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        user_id: UserId::from_uuid(row.user_id),
        user_name,
        action: ChangeAction::from(row.action),
        details: row.details,
        created_at: row.created_at,
    })
}
