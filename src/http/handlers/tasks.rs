//! Task routes.

use crate::{
    http::{
        ApiErrorResponse, AppState, AuthenticatedUser,
        dto::{
            ChangeLogResponse, CreateTaskBody, MessageResponse, PageQuery, TaskResponse,
            UpdateTaskBody,
        },
    },
    task::domain::{Task, TaskId},
};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use uuid::Uuid;

type ApiResult<T> = Result<T, ApiErrorResponse>;

fn task_id(path: Result<Path<Uuid>, PathRejection>) -> ApiResult<TaskId> {
    let Path(id) = path?;
    Ok(TaskId::from_uuid(id))
}

fn task_list(tasks: &[Task]) -> Json<Vec<TaskResponse>> {
    Json(tasks.iter().map(TaskResponse::from).collect())
}

/// `GET /tasks`
pub async fn list_tasks(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<TaskResponse>>> {
    let Query(page_query) = query?;
    let tasks = state.tasks.list(page_query.into_page()?).await?;
    Ok(task_list(&tasks))
}

/// `GET /tasks/archived`
pub async fn list_archived_tasks(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<TaskResponse>>> {
    let Query(page_query) = query?;
    let tasks = state.tasks.list_archived(page_query.into_page()?).await?;
    Ok(task_list(&tasks))
}

/// `GET /tasks/{id}`
pub async fn get_task(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<TaskResponse>> {
    let task = state.tasks.get(task_id(path)?).await?;
    Ok(Json(TaskResponse::from(&task)))
}

/// `POST /tasks`
pub async fn create_task(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    body: Result<Json<CreateTaskBody>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<TaskResponse>)> {
    let Json(request) = body?;
    let task = state.tasks.create(user, request.into()).await?;
    Ok((StatusCode::CREATED, Json(TaskResponse::from(&task))))
}

/// `PUT /tasks/{id}`
pub async fn update_task(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    path: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<UpdateTaskBody>, JsonRejection>,
) -> ApiResult<Json<TaskResponse>> {
    let id = task_id(path)?;
    let Json(request) = body?;
    let update = state.tasks.update(id, user, request.into()).await?;
    Ok(Json(TaskResponse::from(&update.task)))
}

/// `DELETE /tasks/{id}`
pub async fn delete_task(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    state.tasks.delete(task_id(path)?, user).await?;
    Ok(Json(MessageResponse::new("Task deleted successfully")))
}

/// `POST /tasks/{id}/archive`
pub async fn archive_task(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<TaskResponse>> {
    let task = state.tasks.archive(task_id(path)?, user).await?;
    Ok(Json(TaskResponse::from(&task)))
}

/// `POST /tasks/{id}/unarchive`
pub async fn unarchive_task(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<TaskResponse>> {
    let task = state.tasks.unarchive(task_id(path)?, user).await?;
    Ok(Json(TaskResponse::from(&task)))
}

/// `GET /tasks/{id}/logs`, most recent first.
pub async fn list_task_logs(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    path: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<Vec<ChangeLogResponse>>> {
    let entries = state.tasks.history(task_id(path)?).await?;
    Ok(Json(entries.iter().map(ChangeLogResponse::from).collect()))
}
