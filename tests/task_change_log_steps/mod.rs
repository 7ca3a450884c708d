//! Step definitions for task change-log scenarios.

pub mod world;

mod when;
