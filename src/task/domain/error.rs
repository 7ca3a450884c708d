//! Error types for task domain parsing.

use crate::validation::ValidationError;
use thiserror::Error;

/// Error returned while parsing a task status string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

impl From<ParseTaskStatusError> for ValidationError {
    fn from(_: ParseTaskStatusError) -> Self {
        Self::new("status", "must be 'To Do', 'In Progress', or 'Done'")
    }
}
