//! Request field validation.
//!
//! Every rule is a pure function over raw request values. Rules run before
//! any store access and report the first failing field as a
//! [`ValidationError`].

mod error;
mod page;
pub mod rules;

pub use error::{ValidationError, ValidationResult};
pub use page::Page;
