//! Ownership checks for mutating operations.
//!
//! Repositories answer an ownership lookup with an [`OwnedResource`]: the
//! owning user plus whatever else the same query fetched (a task title for
//! log messages, the parent task of a comment). [`authorize`] turns that
//! lookup into either the fetched data or an [`OwnershipError`] that keeps
//! "does not exist" and "belongs to someone else" apart.

use crate::identity::UserId;
use thiserror::Error;

/// Owner of a resource together with data fetched in the same lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedResource<T> {
    owner: UserId,
    data: T,
}

impl<T> OwnedResource<T> {
    /// Creates an ownership lookup result.
    #[must_use]
    pub const fn new(owner: UserId, data: T) -> Self {
        Self { owner, data }
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Returns the data fetched alongside the owner.
    #[must_use]
    pub const fn data(&self) -> &T {
        &self.data
    }

    /// Consumes the lookup and returns the fetched data.
    #[must_use]
    pub fn into_data(self) -> T {
        self.data
    }
}

/// Ownership check failure.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum OwnershipError<Id> {
    /// No resource exists with the identifier.
    #[error("{0} not found")]
    NotFound(Id),

    /// The resource exists but belongs to another user.
    #[error("user {actor} does not own {id}")]
    Forbidden {
        /// Identifier of the resource.
        id: Id,
        /// User that attempted the operation.
        actor: UserId,
    },
}

/// Checks that `actor` owns the resource described by `lookup`.
///
/// # Errors
///
/// Returns [`OwnershipError::NotFound`] when `lookup` is `None` and
/// [`OwnershipError::Forbidden`] when the owner differs from `actor`.
pub fn authorize<Id, T>(
    id: Id,
    lookup: Option<OwnedResource<T>>,
    actor: UserId,
) -> Result<T, OwnershipError<Id>> {
    let Some(resource) = lookup else {
        return Err(OwnershipError::NotFound(id));
    };
    if resource.owner() != actor {
        return Err(OwnershipError::Forbidden { id, actor });
    }
    Ok(resource.into_data())
}
