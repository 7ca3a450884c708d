//! In-memory adapters for comments.

mod comment;

pub use comment::InMemoryCommentRepository;
