//! Taskboard: a multi-user task tracker with comments and an audit trail.
//!
//! Users create tasks, which they then own. Owners update tasks field by
//! field, archive and restore them, or delete them. Any user may comment on
//! a task; only a comment's author may change it. Every mutation appends a
//! human-readable entry to the task's change log on a best-effort basis.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: In-memory and `PostgreSQL` implementations of the ports
//! - **Services**: Orchestration of validation, ownership, persistence, and
//!   change logging
//!
//! # Modules
//!
//! - [`validation`]: Request field rules and pagination
//! - [`identity`]: Acting user and bearer-token resolution
//! - [`ownership`]: Not-found versus forbidden ownership checks
//! - [`task`]: Task lifecycle and partial updates
//! - [`comment`]: Comments on tasks
//! - [`change_log`]: Append-only audit trail
//! - [`storage`]: Shared in-memory and `PostgreSQL` plumbing
//! - [`timestamp`]: Clock readings at storage precision
//! - [`config`]: Environment configuration
//! - [`http`]: axum router and handlers

pub mod change_log;
pub mod comment;
pub mod config;
pub mod http;
pub mod identity;
pub mod ownership;
pub mod storage;
pub mod task;
pub mod timestamp;
pub mod validation;
