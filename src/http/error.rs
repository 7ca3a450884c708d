//! API error responses.
//!
//! Service errors map onto status codes here: validation 400, missing or
//! unknown token 401, ownership 403, missing resource 404, and storage
//! failures 500. Storage details are logged and never returned.

use crate::{
    comment::services::CommentServiceError, task::services::TaskServiceError,
    validation::ValidationError,
};
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// JSON error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Field-level failures for validation errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

impl ApiError {
    /// Creates an error body without details.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }
}

/// One rejected request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Field name.
    pub field: String,
    /// Reason the value was rejected.
    pub message: String,
}

/// Error body paired with its status code.
#[derive(Debug, Clone)]
pub struct ApiErrorResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates an error response.
    #[must_use]
    pub const fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }

    /// 400 for a malformed request.
    #[must_use]
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiError::new(code, message))
    }

    /// 401 for a missing or unknown bearer token.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, ApiError::new("UNAUTHORIZED", message))
    }

    /// 403 for an ownership failure.
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, ApiError::new("FORBIDDEN", message))
    }

    /// 404 for a missing resource.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", message))
    }

    /// 500 with a generic message. `source` is logged, not returned.
    #[must_use]
    pub fn internal_error(source: &dyn std::error::Error) -> Self {
        tracing::error!(error = %source, "request failed with internal error");
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::new("INTERNAL_ERROR", "internal server error"),
        )
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<ValidationError> for ApiErrorResponse {
    fn from(error: ValidationError) -> Self {
        let mut body = ApiError::new("VALIDATION_ERROR", error.to_string());
        body.details = Some(vec![FieldError {
            field: error.field().to_owned(),
            message: error.reason().to_owned(),
        }]);
        Self::new(StatusCode::BAD_REQUEST, body)
    }
}

impl From<TaskServiceError> for ApiErrorResponse {
    fn from(error: TaskServiceError) -> Self {
        match error {
            TaskServiceError::Validation(validation) => Self::from(validation),
            TaskServiceError::NoFieldsToUpdate => {
                Self::bad_request("NO_FIELDS_TO_UPDATE", "no fields to update")
            }
            TaskServiceError::NotFound(_) => Self::not_found("task not found"),
            TaskServiceError::Forbidden { .. } => {
                Self::forbidden("you do not have permission to modify this task")
            }
            TaskServiceError::Repository(source) => Self::internal_error(&source),
            TaskServiceError::ChangeLog(source) => Self::internal_error(&source),
        }
    }
}

impl From<CommentServiceError> for ApiErrorResponse {
    fn from(error: CommentServiceError) -> Self {
        match error {
            CommentServiceError::Validation(validation) => Self::from(validation),
            CommentServiceError::TaskNotFound(_) => Self::not_found("task not found"),
            CommentServiceError::NotFound(_) => Self::not_found("comment not found"),
            CommentServiceError::Forbidden { .. } => {
                Self::forbidden("you do not have permission to modify this comment")
            }
            CommentServiceError::Repository(source) => Self::internal_error(&source),
            CommentServiceError::TaskRepository(source) => Self::internal_error(&source),
        }
    }
}

impl From<JsonRejection> for ApiErrorResponse {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request("INVALID_JSON", rejection.body_text())
    }
}

impl From<QueryRejection> for ApiErrorResponse {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request("INVALID_QUERY", rejection.body_text())
    }
}

impl From<PathRejection> for ApiErrorResponse {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request("INVALID_PATH", rejection.body_text())
    }
}
