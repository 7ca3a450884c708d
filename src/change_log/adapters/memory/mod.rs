//! In-memory adapters for the change log.

mod change_log;

pub use change_log::InMemoryChangeLogRepository;
