//! `PostgreSQL` adapters for comment persistence.

mod models;
mod repository;

pub use repository::PostgresCommentRepository;
