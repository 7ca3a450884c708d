//! Comments attached to tasks.
//!
//! Any authenticated user may comment on an existing task; only the author
//! may edit or delete a comment. Every mutation appends a fixed-wording
//! entry to the parent task's change log.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
