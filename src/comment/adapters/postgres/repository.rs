//! `PostgreSQL` repository implementation for comment storage.

use super::models::{CommentRow, NewCommentRow};
use crate::{
    comment::{
        domain::{Comment, CommentContent, CommentId, PersistedCommentData},
        ports::{CommentRepository, CommentRepositoryError, CommentRepositoryResult},
    },
    identity::UserId,
    ownership::OwnedResource,
    storage::postgres::{
        COMMENTS_TASK_FKEY, PgPool, get_conn_with, is_foreign_key_violation,
        is_unique_violation, run_blocking_with,
        schema::{comments, users},
        user_name,
    },
    task::domain::TaskId,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;

/// `PostgreSQL`-backed comment repository.
#[derive(Debug, Clone)]
pub struct PostgresCommentRepository {
    pool: PgPool,
}

impl PostgresCommentRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> CommentRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> CommentRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection = get_conn_with(&pool, CommentRepositoryError::persistence)?;
                f(&mut connection)
            },
            CommentRepositoryError::persistence,
        )
        .await
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn store(&self, comment: &Comment) -> CommentRepositoryResult<()> {
        let comment_id = comment.id();
        let task_id = comment.task_id();
        let new_row = NewCommentRow {
            id: comment_id.into_inner(),
            task_id: task_id.into_inner(),
            user_id: comment.user_id().into_inner(),
            content: comment.content().as_str().to_owned(),
            created_at: comment.created_at(),
            updated_at: comment.updated_at(),
        };

        self.run_blocking(move |connection| {
            diesel::insert_into(comments::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| {
                    if is_foreign_key_violation(&err, COMMENTS_TASK_FKEY) {
                        CommentRepositoryError::TaskNotFound(task_id)
                    } else if is_unique_violation(&err) {
                        CommentRepositoryError::DuplicateComment(comment_id)
                    } else {
                        CommentRepositoryError::persistence(err)
                    }
                })?;
            Ok(())
        })
        .await
    }

    async fn find_owner(
        &self,
        id: CommentId,
    ) -> CommentRepositoryResult<Option<OwnedResource<TaskId>>> {
        self.run_blocking(move |connection| {
            let row = comments::table
                .filter(comments::id.eq(id.into_inner()))
                .select((comments::user_id, comments::task_id))
                .first::<(uuid::Uuid, uuid::Uuid)>(connection)
                .optional()
                .map_err(CommentRepositoryError::persistence)?;
            Ok(row.map(|(user_id, task_id)| {
                OwnedResource::new(UserId::from_uuid(user_id), TaskId::from_uuid(task_id))
            }))
        })
        .await
    }

    async fn list_for_task(&self, task_id: TaskId) -> CommentRepositoryResult<Vec<Comment>> {
        self.run_blocking(move |connection| {
            let rows = comments::table
                .left_join(users::table)
                .filter(comments::task_id.eq(task_id.into_inner()))
                .order(comments::created_at.asc())
                .select((CommentRow::as_select(), users::name.nullable()))
                .load::<(CommentRow, Option<String>)>(connection)
                .map_err(CommentRepositoryError::persistence)?;
            rows.into_iter()
                .map(|(comment_row, name)| row_to_comment(comment_row, name))
                .collect()
        })
        .await
    }

    async fn update_content(
        &self,
        id: CommentId,
        author: UserId,
        content: &CommentContent,
        updated_at: DateTime<Utc>,
    ) -> CommentRepositoryResult<Comment> {
        let body = content.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = diesel::update(
                comments::table
                    .filter(comments::id.eq(id.into_inner()))
                    .filter(comments::user_id.eq(author.into_inner())),
            )
            .set((comments::content.eq(body), comments::updated_at.eq(updated_at)))
            .returning(CommentRow::as_returning())
            .get_result::<CommentRow>(connection)
            .optional()
            .map_err(CommentRepositoryError::persistence)?
            .ok_or(CommentRepositoryError::NotFound(id))?;
            let name =
                user_name(connection, row.user_id).map_err(CommentRepositoryError::persistence)?;
            row_to_comment(row, name)
        })
        .await
    }

    async fn delete(&self, id: CommentId, author: UserId) -> CommentRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let affected = diesel::delete(
                comments::table
                    .filter(comments::id.eq(id.into_inner()))
                    .filter(comments::user_id.eq(author.into_inner())),
            )
            .execute(connection)
            .map_err(CommentRepositoryError::persistence)?;
            if affected == 0 {
                return Err(CommentRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn row_to_comment(row: CommentRow, author_name: Option<String>) -> CommentRepositoryResult<Comment> {
    let content = CommentContent::new(row.content).map_err(CommentRepositoryError::persistence)?;
    Ok(Comment::from_persisted(PersistedCommentData {
        id: CommentId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        user_id: UserId::from_uuid(row.user_id),
        user_name: author_name,
        content,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
