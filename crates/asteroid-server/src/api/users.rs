use asteroid_identity::{IdentityStore, User};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::{api::helpers::parse_uuid, error::ApiError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[serde(rename = "publicKey")]
    pub public_key: String,
}

/// Public view of a user, including the nonce to sign for the next login
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub public_key: String,
    pub nonce: String,
    pub is_admin: bool,
    pub created_at: i64,
    pub updated_at: i64,
    pub notes: Vec<Uuid>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            public_key: user.public_key,
            nonce: user.nonce,
            is_admin: user.is_admin,
            created_at: user.created_at,
            updated_at: user.updated_at,
            notes: user.notes,
        }
    }
}

/// POST /users
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let user = state
        .identity_service
        .create_user(&state.op_context(), &req.public_key)
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /users/:id
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let id = parse_uuid(&id, "user id")?;

    let user = state
        .identity_service
        .find_user(&state.op_context(), id)
        .await?;

    Ok(Json(user.into()))
}
