//! `PostgreSQL` change-log repository.

mod models;
mod repository;

pub use repository::PostgresChangeLogRepository;
