//! Shared handler state.

use crate::{
    change_log::ports::ChangeLogRepository,
    comment::{ports::CommentRepository, services::CommentService},
    identity::IdentityResolver,
    storage::Repositories,
    task::{ports::TaskRepository, services::TaskService},
};
use mockable::DefaultClock;
use std::sync::Arc;

/// Task service over type-erased repositories.
pub type DynTaskService = TaskService<dyn TaskRepository, dyn ChangeLogRepository, DefaultClock>;

/// Comment service over type-erased repositories.
pub type DynCommentService = CommentService<
    dyn CommentRepository,
    dyn TaskRepository,
    dyn ChangeLogRepository,
    DefaultClock,
>;

/// State cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    /// Task operations.
    pub tasks: DynTaskService,
    /// Comment operations.
    pub comments: DynCommentService,
    /// Bearer-token resolver.
    pub identity: Arc<dyn IdentityResolver>,
}

impl AppState {
    /// Wires services over `repositories`.
    #[must_use]
    pub fn new(repositories: Repositories, identity: Arc<dyn IdentityResolver>) -> Self {
        let clock = Arc::new(DefaultClock);
        let Repositories {
            tasks,
            comments,
            change_logs,
        } = repositories;
        Self {
            tasks: TaskService::new(Arc::clone(&tasks), Arc::clone(&change_logs), Arc::clone(&clock)),
            comments: CommentService::new(comments, tasks, change_logs, clock),
            identity,
        }
    }
}
