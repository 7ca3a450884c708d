//! Adapter implementations of the change-log port.

pub mod memory;
pub mod postgres;
