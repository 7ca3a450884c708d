//! In-memory comment repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    comment::{
        domain::{Comment, CommentContent, CommentId},
        ports::{CommentRepository, CommentRepositoryError, CommentRepositoryResult},
    },
    identity::UserId,
    ownership::OwnedResource,
    storage::memory::InMemoryDatabase,
    task::domain::TaskId,
};

/// Comment repository over the shared [`InMemoryDatabase`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryCommentRepository {
    database: InMemoryDatabase,
}

impl InMemoryCommentRepository {
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
impl CommentRepository for InMemoryCommentRepository {
    async fn store(&self, comment: &Comment) -> CommentRepositoryResult<()> {
        let mut tables = self
            .database
            .write()
            .map_err(CommentRepositoryError::persistence)?;
        if tables.task(comment.task_id()).is_none() {
            return Err(CommentRepositoryError::TaskNotFound(comment.task_id()));
        }
        if tables.comments.iter().any(|row| row.id() == comment.id()) {
            return Err(CommentRepositoryError::DuplicateComment(comment.id()));
        }
        tables.comments.push(comment.clone());
        Ok(())
    }

    async fn find_owner(
        &self,
        id: CommentId,
    ) -> CommentRepositoryResult<Option<OwnedResource<TaskId>>> {
        let tables = self
            .database
            .read()
            .map_err(CommentRepositoryError::persistence)?;
        Ok(tables
            .comments
            .iter()
            .find(|comment| comment.id() == id)
            .map(|comment| OwnedResource::new(comment.user_id(), comment.task_id())))
    }

    async fn list_for_task(&self, task_id: TaskId) -> CommentRepositoryResult<Vec<Comment>> {
        let tables = self
            .database
            .read()
            .map_err(CommentRepositoryError::persistence)?;
        let mut comments: Vec<Comment> = tables
            .comments
            .iter()
            .filter(|comment| comment.task_id() == task_id)
            .map(|comment| {
                comment
                    .clone()
                    .with_user_name(tables.user_name(comment.user_id()))
            })
            .collect();
        comments.sort_by_key(Comment::created_at);
        Ok(comments)
    }

    async fn update_content(
        &self,
        id: CommentId,
        author: UserId,
        content: &CommentContent,
        updated_at: DateTime<Utc>,
    ) -> CommentRepositoryResult<Comment> {
        let mut tables = self
            .database
            .write()
            .map_err(CommentRepositoryError::persistence)?;
        let comment = tables
            .comments
            .iter_mut()
            .find(|comment| comment.id() == id && comment.user_id() == author)
            .ok_or(CommentRepositoryError::NotFound(id))?;
        comment.edit(content.clone(), updated_at);
        let updated = comment.clone();
        let name = tables.user_name(updated.user_id());
        Ok(updated.with_user_name(name))
    }

    async fn delete(&self, id: CommentId, author: UserId) -> CommentRepositoryResult<()> {
        let mut tables = self
            .database
            .write()
            .map_err(CommentRepositoryError::persistence)?;
        let before = tables.comments.len();
        tables
            .comments
            .retain(|comment| !(comment.id() == id && comment.user_id() == author));
        if tables.comments.len() == before {
            return Err(CommentRepositoryError::NotFound(id));
        }
        Ok(())
    }
}
