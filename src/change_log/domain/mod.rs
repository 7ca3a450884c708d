//! Domain model for change-log entries.

mod action;
mod entry;
mod format;

pub use action::ChangeAction;
pub use entry::{ChangeLogEntry, ChangeLogId, PersistedChangeLogData};
pub use format::format_change_details;
