//! HTTP surface.
//!
//! Every route except `/health` requires `Authorization: Bearer <token>`;
//! the token is resolved to a user before any handler logic runs.

mod auth;
pub mod dto;
mod error;
pub mod handlers;
mod state;

pub use auth::AuthenticatedUser;
pub use error::{ApiError, ApiErrorResponse, FieldError};
pub use state::{AppState, DynCommentService, DynTaskService};

use axum::{
    Router,
    routing::{get, post, put},
};
use handlers::{comments, health, tasks};
use tower_http::trace::TraceLayer;

/// Builds the application router.
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route("/tasks/archived", get(tasks::list_archived_tasks))
        .route(
            "/tasks/{id}",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route("/tasks/{id}/archive", post(tasks::archive_task))
        .route("/tasks/{id}/unarchive", post(tasks::unarchive_task))
        .route("/tasks/{id}/logs", get(tasks::list_task_logs))
        .route(
            "/tasks/{id}/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route(
            "/comments/{id}",
            put(comments::update_comment).delete(comments::delete_comment),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
