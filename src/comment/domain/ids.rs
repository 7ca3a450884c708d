//! Identifier and validated content types for comments.

use crate::validation::{ValidationResult, rules::validate_comment_content};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(Uuid);

impl CommentId {
    /// Creates a new random comment identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a comment identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for CommentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "comment {}", self.0)
    }
}

/// Comment body: non-blank and at most 5000 characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentContent(String);

impl CommentContent {
    /// Creates validated comment content.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::validation::ValidationError`] on `content` when the
    /// value is blank or too long.
    pub fn new(value: impl Into<String>) -> ValidationResult<Self> {
        let raw = value.into();
        validate_comment_content(&raw)?;
        Ok(Self(raw))
    }

    /// Returns the content as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CommentContent {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
