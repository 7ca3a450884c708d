//! Adapter implementations of the comment port.

pub mod memory;
pub mod postgres;
