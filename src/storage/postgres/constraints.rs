//! Classification of `PostgreSQL` constraint violations.

use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Foreign key from `comments.task_id` to `tasks.id`.
pub(crate) const COMMENTS_TASK_FKEY: &str = "comments_task_id_fkey";

/// Foreign key from `change_logs.task_id` to `tasks.id`.
pub(crate) const CHANGE_LOGS_TASK_FKEY: &str = "change_logs_task_id_fkey";

/// Returns `true` when `err` is a foreign-key violation of `constraint`.
pub(crate) fn is_foreign_key_violation(err: &DieselError, constraint: &str) -> bool {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            info.constraint_name() == Some(constraint)
        }
        _ => false,
    }
}

/// Returns `true` when `err` is a unique violation.
pub(crate) const fn is_unique_violation(err: &DieselError) -> bool {
    matches!(
        err,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}
