//! Individual validation rules.
//!
//! Each rule returns `Ok` with the accepted value or a [`ValidationError`]
//! naming the field and the reason it was rejected.

use super::{ValidationError, ValidationResult};

/// Maximum task title length, in characters.
pub const MAX_TITLE_CHARS: usize = 500;

/// Maximum comment length, in characters.
pub const MAX_COMMENT_CHARS: usize = 5000;

/// Largest accepted page size.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Validates a task title.
///
/// # Errors
///
/// Returns a [`ValidationError`] on `title` when the value is empty after
/// trimming or longer than [`MAX_TITLE_CHARS`].
pub fn validate_title(title: &str) -> ValidationResult<()> {
    validate_bounded_text("title", title, MAX_TITLE_CHARS)
}

/// Validates comment content. Create and update share this rule.
///
/// # Errors
///
/// Returns a [`ValidationError`] on `content` when the value is empty after
/// trimming or longer than [`MAX_COMMENT_CHARS`].
pub fn validate_comment_content(content: &str) -> ValidationResult<()> {
    validate_bounded_text("content", content, MAX_COMMENT_CHARS)
}

/// Validates pagination bounds.
///
/// # Errors
///
/// Returns a [`ValidationError`] on `limit` when it falls outside
/// `1..=100`, or on `offset` when it is negative.
pub fn validate_pagination(limit: i64, offset: i64) -> ValidationResult<()> {
    if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
        return Err(ValidationError::new(
            "limit",
            format!("must be between 1 and {MAX_PAGE_LIMIT}"),
        ));
    }
    if offset < 0 {
        return Err(ValidationError::new("offset", "must be >= 0"));
    }
    Ok(())
}

fn validate_bounded_text(field: &'static str, value: &str, max_chars: usize) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "must not be empty"));
    }
    if value.chars().count() > max_chars {
        return Err(ValidationError::new(
            field,
            format!("must be at most {max_chars} characters"),
        ));
    }
    Ok(())
}
