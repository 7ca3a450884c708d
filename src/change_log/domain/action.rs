//! Change-log action tags.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag describing what happened to a task.
///
/// Stored as free-form text; tags written by this service map to the named
/// variants and anything else round-trips through [`ChangeAction::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChangeAction {
    /// Task created.
    Created,
    /// Task fields updated.
    Updated,
    /// Task deleted.
    Deleted,
    /// Task archived.
    Archived,
    /// Task restored from the archive.
    Unarchived,
    /// Comment added.
    Commented,
    /// Comment edited.
    UpdatedComment,
    /// Comment removed.
    DeletedComment,
    /// Any other tag.
    Other(String),
}

impl ChangeAction {
    /// Returns the storage representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
            Self::Archived => "archived",
            Self::Unarchived => "unarchived",
            Self::Commented => "commented",
            Self::UpdatedComment => "updated_comment",
            Self::DeletedComment => "deleted_comment",
            Self::Other(tag) => tag,
        }
    }
}

impl From<&str> for ChangeAction {
    fn from(value: &str) -> Self {
        match value {
            "created" => Self::Created,
            "updated" => Self::Updated,
            "deleted" => Self::Deleted,
            "archived" => Self::Archived,
            "unarchived" => Self::Unarchived,
            "commented" => Self::Commented,
            "updated_comment" => Self::UpdatedComment,
            "deleted_comment" => Self::DeletedComment,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl From<String> for ChangeAction {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<ChangeAction> for String {
    fn from(value: ChangeAction) -> Self {
        match value {
            ChangeAction::Other(tag) => tag,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
