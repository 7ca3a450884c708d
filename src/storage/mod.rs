//! Storage back ends shared by every aggregate.
//!
//! Tasks, comments, and change-log entries live in one store so a task
//! delete can cascade to its dependants. [`memory`] keeps all tables behind
//! a single lock; [`postgres`] relies on foreign-key cascades.

pub mod memory;
pub mod postgres;

use crate::{
    change_log::{
        adapters::{memory::InMemoryChangeLogRepository, postgres::PostgresChangeLogRepository},
        ports::ChangeLogRepository,
    },
    comment::{
        adapters::{memory::InMemoryCommentRepository, postgres::PostgresCommentRepository},
        ports::CommentRepository,
    },
    task::{
        adapters::{memory::InMemoryTaskRepository, postgres::PostgresTaskRepository},
        ports::TaskRepository,
    },
};
use std::sync::Arc;

/// One repository per aggregate, all backed by the same store.
#[derive(Clone)]
pub struct Repositories {
    /// Task repository.
    pub tasks: Arc<dyn TaskRepository>,
    /// Comment repository.
    pub comments: Arc<dyn CommentRepository>,
    /// Change-log repository.
    pub change_logs: Arc<dyn ChangeLogRepository>,
}

impl Repositories {
    /// Creates repositories over a fresh in-memory database.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::in_memory_with(memory::InMemoryDatabase::new())
    }

    /// Creates repositories sharing an existing in-memory database.
    #[must_use]
    pub fn in_memory_with(database: memory::InMemoryDatabase) -> Self {
        Self {
            tasks: Arc::new(InMemoryTaskRepository::with_database(database.clone())),
            comments: Arc::new(InMemoryCommentRepository::with_database(database.clone())),
            change_logs: Arc::new(InMemoryChangeLogRepository::with_database(database)),
        }
    }

    /// Creates repositories over a `PostgreSQL` pool.
    #[must_use]
    pub fn postgres(pool: &postgres::PgPool) -> Self {
        Self {
            tasks: Arc::new(PostgresTaskRepository::new(pool.clone())),
            comments: Arc::new(PostgresCommentRepository::new(pool.clone())),
            change_logs: Arc::new(PostgresChangeLogRepository::new(pool.clone())),
        }
    }
}
