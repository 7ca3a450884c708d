//! Append-only audit trail of actions taken on tasks.
//!
//! Entries are written as a best-effort side effect of every mutating task
//! and comment operation. A failed write is logged and dropped; it never
//! fails or rolls back the operation it accompanies.
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The recorder service in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
