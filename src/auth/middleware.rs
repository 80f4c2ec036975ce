//! Bearer token extraction for protected routes

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::api::error::ApiError;
use crate::api::server::SharedState;
use crate::auth::Claims;

/// Token from an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &axum::http::HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Claims of the authenticated caller. Rejects with 401 when the bearer
/// token is missing or does not validate.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl FromRequestParts<SharedState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or_else(ApiError::not_authenticated)?;

        match state.keys.validate_token(token) {
            // Validation allows clock leeway; an exp in the past is still refused
            Ok(claims) if claims.is_expired() => {
                tracing::warn!("Rejected expired token for {}", claims.username);
                Err(ApiError::unauthorized("Could not validate credentials"))
            }
            Ok(claims) => Ok(AuthUser(claims)),
            Err(e) => {
                tracing::warn!("Rejected bearer token: {}", e);
                Err(ApiError::unauthorized("Could not validate credentials"))
            }
        }
    }
}
