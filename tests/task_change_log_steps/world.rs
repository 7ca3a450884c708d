//! Shared world state for task change-log BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::{
    comment::{
        adapters::memory::InMemoryCommentRepository,
        domain::Comment,
        services::{CommentService, CommentServiceError},
    },
    change_log::adapters::memory::InMemoryChangeLogRepository,
    identity::UserId,
    storage::memory::InMemoryDatabase,
    task::{
        adapters::memory::InMemoryTaskRepository,
        domain::Task,
        services::{TaskService, TaskServiceError, TaskUpdate},
    },
};

/// Task service type used by the BDD world.
pub type TestTaskService =
    TaskService<InMemoryTaskRepository, InMemoryChangeLogRepository, DefaultClock>;

/// Comment service type used by the BDD world.
pub type TestCommentService = CommentService<
    InMemoryCommentRepository,
    InMemoryTaskRepository,
    InMemoryChangeLogRepository,
    DefaultClock,
>;

/// Scenario world for change-log behaviour tests.
pub struct ChangeLogWorld {
    pub tasks: TestTaskService,
    pub comments: TestCommentService,
    pub owner: UserId,
    pub other: UserId,
    pub task: Option<Task>,
    pub last_update: Option<Result<TaskUpdate, TaskServiceError>>,
    pub last_comment: Option<Result<Comment, CommentServiceError>>,
}

impl ChangeLogWorld {
    /// Creates a world over a fresh in-memory store.
    #[must_use]
    pub fn new() -> Self {
        let database = InMemoryDatabase::new();
        let task_repository = Arc::new(InMemoryTaskRepository::with_database(database.clone()));
        let change_logs = Arc::new(InMemoryChangeLogRepository::with_database(database.clone()));
        let clock = Arc::new(DefaultClock);

        Self {
            tasks: TaskService::new(
                Arc::clone(&task_repository),
                Arc::clone(&change_logs),
                Arc::clone(&clock),
            ),
            comments: CommentService::new(
                Arc::new(InMemoryCommentRepository::with_database(database)),
                task_repository,
                change_logs,
                clock,
            ),
            owner: UserId::new(),
            other: UserId::new(),
            task: None,
            last_update: None,
            last_comment: None,
        }
    }

    /// Returns the task created by the scenario background.
    ///
    /// # Errors
    ///
    /// Returns an error when no task has been created yet.
    pub fn task(&self) -> Result<&Task, eyre::Report> {
        self.task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing created task in scenario world"))
    }
}

impl Default for ChangeLogWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ChangeLogWorld {
    ChangeLogWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
