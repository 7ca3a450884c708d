//! Application services for the change log.

mod recorder;

pub use recorder::{ChangeLogRecorder, RecordOutcome};
