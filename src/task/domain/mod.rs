//! Domain model for tasks.
//!
//! Tasks are owned by their creator. Creation input is validated into a
//! [`TaskDraft`]; partial updates are validated into a [`TaskPatch`] which
//! also renders the human-readable change fragments recorded in the change
//! log.

mod error;
mod ids;
mod patch;
mod task;

pub use error::ParseTaskStatusError;
pub use ids::{TaskId, TaskTitle};
pub use patch::{DueDateChange, TaskPatch};
pub use task::{PersistedTaskData, Task, TaskDraft, TaskStatus};
