//! Bearer-token authentication extractor.

use super::{ApiErrorResponse, AppState};
use crate::identity::UserId;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

/// The user a request acts as, resolved from its bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub UserId);

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiErrorResponse;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ApiErrorResponse::unauthorized("missing bearer token"))?;

        state
            .identity
            .resolve(token)
            .await
            .map(Self)
            .ok_or_else(|| ApiErrorResponse::unauthorized("invalid bearer token"))
    }
}
