//! Bearer-token resolution.

use super::UserId;
use async_trait::async_trait;
use std::collections::HashMap;

/// Resolves a bearer token to the user it was issued for.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Returns the user for `token`, or `None` when the token is unknown.
    async fn resolve(&self, token: &str) -> Option<UserId>;
}

/// Resolver backed by a fixed token table loaded from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenResolver {
    tokens: HashMap<String, UserId>,
}

impl StaticTokenResolver {
    /// Creates a resolver from `(token, user)` pairs.
    #[must_use]
    pub fn new(entries: impl IntoIterator<Item = (String, UserId)>) -> Self {
        Self {
            tokens: entries.into_iter().collect(),
        }
    }

    /// Returns every user known to the resolver.
    #[must_use]
    pub fn users(&self) -> Vec<UserId> {
        let mut users: Vec<UserId> = self.tokens.values().copied().collect();
        users.sort_by_key(|user| user.into_inner());
        users.dedup();
        users
    }
}

#[async_trait]
impl IdentityResolver for StaticTokenResolver {
    async fn resolve(&self, token: &str) -> Option<UserId> {
        self.tokens.get(token).copied()
    }
}
