//! Validated pagination window.

use super::{ValidationResult, rules::validate_pagination};

/// Limit/offset window for paginated listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    limit: i64,
    offset: i64,
}

impl Page {
    /// Page size used when the caller does not supply one.
    pub const DEFAULT_LIMIT: i64 = 10;

    /// Creates a validated page window.
    ///
    /// # Errors
    ///
    /// Returns a [`super::ValidationError`] when `limit` is outside `1..=100`
    /// or `offset` is negative.
    pub fn new(limit: i64, offset: i64) -> ValidationResult<Self> {
        validate_pagination(limit, offset)?;
        Ok(Self { limit, offset })
    }

    /// Builds a page from optional query parameters, applying defaults for
    /// missing values before validating.
    ///
    /// # Errors
    ///
    /// Returns a [`super::ValidationError`] when a supplied value is out of
    /// range.
    pub fn from_query(limit: Option<i64>, offset: Option<i64>) -> ValidationResult<Self> {
        Self::new(limit.unwrap_or(Self::DEFAULT_LIMIT), offset.unwrap_or(0))
    }

    /// Returns the page size.
    #[must_use]
    pub const fn limit(self) -> i64 {
        self.limit
    }

    /// Returns the number of rows skipped.
    #[must_use]
    pub const fn offset(self) -> i64 {
        self.offset
    }

    /// Returns the window as `usize` bounds for slicing in-memory rows.
    #[must_use]
    pub fn as_range_bounds(self) -> (usize, usize) {
        let skip = usize::try_from(self.offset).unwrap_or(usize::MAX);
        let take = usize::try_from(self.limit).unwrap_or(0);
        (skip, take)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: Self::DEFAULT_LIMIT,
            offset: 0,
        }
    }
}
