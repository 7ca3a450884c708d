//! Task management.
//!
//! Tasks are created by any authenticated user, who becomes the owner.
//! Only the owner may update, archive, restore, or delete a task. Updates
//! are partial: only supplied fields are written, and each changed field
//! contributes one fragment to the change-log entry. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
