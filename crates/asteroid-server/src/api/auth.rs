use asteroid_auth::ChallengeAuthenticator;
use asteroid_sessions::{SessionManager, SessionToken};
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
};
use base64::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    api::helpers::{format_timestamp_rfc3339, parse_uuid, session_cookie},
    error::ApiError,
    extractors::SessionCredential,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub id: String,
    /// base64 RSA-PSS signature over the user's current nonce
    pub signature: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub code: u16,
    pub token: String,
    pub expire: String,
}

/// POST /login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    let id = parse_uuid(&req.id, "id")?;
    tracing::info!(identity_id = %id, "Login attempt");

    let signature = BASE64_STANDARD.decode(req.signature.trim()).map_err(|_| {
        tracing::warn!(identity_id = %id, "Login signature is not base64");
        ApiError::Unauthorized
    })?;

    let user = state
        .auth_service
        .authenticate(&state.op_context(), id, &signature)
        .await?;

    let session = state.session_service.issue(&user)?;
    token_response(&state, session)
}

/// GET /refresh_token
pub async fn refresh_token(
    State(state): State<Arc<AppState>>,
    SessionCredential(token): SessionCredential,
) -> Result<Response, ApiError> {
    let session = state.session_service.refresh(&token)?;
    token_response(&state, session)
}

fn token_response(state: &AppState, session: SessionToken) -> Result<Response, ApiError> {
    let cookie = session_cookie(
        &state.config.session_cookie_name,
        &session.token,
        state.config.session_ttl,
    )?;

    let body = TokenResponse {
        code: StatusCode::OK.as_u16(),
        expire: format_timestamp_rfc3339(session.expires_at)?,
        token: session.token,
    };

    Ok(([(header::SET_COOKIE, cookie)], Json(body)).into_response())
}
