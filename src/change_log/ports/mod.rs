//! Port contracts for the change log.

pub mod repository;

pub use repository::{ChangeLogRepository, ChangeLogRepositoryError, ChangeLogRepositoryResult};

#[cfg(test)]
pub use repository::MockChangeLogRepository;
