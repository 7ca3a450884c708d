//! Domain model for task comments.

mod comment;
mod ids;

pub use comment::{Comment, PersistedCommentData};
pub use ids::{CommentContent, CommentId};
