//! Application services for comments.

mod comment_service;

pub use comment_service::{CommentService, CommentServiceError, CommentServiceResult};
