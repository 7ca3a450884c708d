//! Comment routes.

use crate::{
    comment::domain::CommentId,
    http::{
        ApiErrorResponse, AppState, AuthenticatedUser,
        dto::{CommentBody, CommentResponse, MessageResponse},
    },
    task::domain::TaskId,
};
use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use uuid::Uuid;

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// `GET /tasks/{id}/comments`, oldest first.
pub async fn list_comments(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let Path(id) = path?;
    let comments = state.comments.list_for_task(TaskId::from_uuid(id)).await?;
    Ok(Json(comments.iter().map(CommentResponse::from).collect()))
}

/// `POST /tasks/{id}/comments`
pub async fn create_comment(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<CommentBody>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CommentResponse>)> {
    let Path(id) = path?;
    let Json(request) = body?;
    let comment = state
        .comments
        .create(TaskId::from_uuid(id), user, request.content)
        .await?;
    Ok((StatusCode::CREATED, Json(CommentResponse::from(&comment))))
}

/// `PUT /comments/{id}`
pub async fn update_comment(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<CommentBody>, JsonRejection>,
) -> ApiResult<Json<CommentResponse>> {
    let Path(id) = path?;
    let Json(request) = body?;
    let comment = state
        .comments
        .update(CommentId::from_uuid(id), user, request.content)
        .await?;
    Ok(Json(CommentResponse::from(&comment)))
}

/// `DELETE /comments/{id}`
pub async fn delete_comment(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(id) = path?;
    state.comments.delete(CommentId::from_uuid(id), user).await?;
    Ok(Json(MessageResponse::new("Comment deleted successfully")))
}
