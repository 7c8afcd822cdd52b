use asteroid_identity::User;
use asteroid_sessions::SessionManager;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use std::sync::Arc;

use crate::{error::ApiError, state::AppState};

/// Raw session token from `Authorization: Bearer` or the session cookie
///
/// Nothing is verified here; the refresh endpoint needs expired tokens too.
pub struct SessionCredential(pub String);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for SessionCredential {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        bearer_token(parts)
            .or_else(|| cookie_token(parts, &state.config.session_cookie_name))
            .map(SessionCredential)
            .ok_or(ApiError::Unauthorized)
    }
}

/// Extractor for authenticated requests
///
/// Verifies the token and re-reads the user it names, so a token for a
/// user that no longer resolves is rejected.
pub struct AuthenticatedUser {
    pub user: User,
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let SessionCredential(token) = SessionCredential::from_request_parts(parts, state).await?;

        let user = state
            .session_service
            .resolve(&state.op_context(), &token)
            .await
            .map_err(|e| {
                tracing::warn!("Session rejected: {}", e);
                ApiError::from(e)
            })?;

        Ok(AuthenticatedUser { user })
    }
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

fn cookie_token(parts: &Parts, cookie_name: &str) -> Option<String> {
    parts
        .headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == cookie_name && !value.is_empty())
        .map(|(_, value)| value.to_string())
}
