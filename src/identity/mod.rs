//! Acting-user identity.
//!
//! Bearer tokens are verified outside the core. The [`IdentityResolver`]
//! port turns a token into the [`UserId`] every mutation is attributed to.

mod resolver;
mod user;

pub use resolver::{IdentityResolver, StaticTokenResolver};
pub use user::UserId;
