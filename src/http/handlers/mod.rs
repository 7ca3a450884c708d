//! Route handlers.

pub mod comments;
pub mod health;
pub mod tasks;
