use asteroid_notes::{Note, NoteStore};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    api::helpers::parse_uuid, error::ApiError, extractors::AuthenticatedUser, state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    pub note: String,
    /// Owner id; defaults to the caller and must match it when given
    pub uid: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NoteResponse {
    pub id: Uuid,
    pub uid: Uuid,
    pub note: String,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            uid: note.uid,
            note: note.data,
        }
    }
}

/// POST /notes
pub async fn create_note(
    State(state): State<Arc<AppState>>,
    auth: AuthenticatedUser,
    Json(req): Json<CreateNoteRequest>,
) -> Result<(StatusCode, Json<NoteResponse>), ApiError> {
    let caller = auth.user.id;
    if let Some(uid) = req.uid.as_deref() {
        if parse_uuid(uid, "uid")? != caller {
            return Err(ApiError::Forbidden(
                "Notes can only be created for yourself".to_string(),
            ));
        }
    }

    let note = state
        .note_service
        .create_note(&state.op_context(), caller, &req.note)
        .await?;

    Ok((StatusCode::CREATED, Json(note.into())))
}

/// GET /notes/:id
pub async fn get_note(
    State(state): State<Arc<AppState>>,
    auth: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<NoteResponse>, ApiError> {
    let id = parse_uuid(&id, "note id")?;

    let note = state
        .note_service
        .get_note_for(&state.op_context(), auth.user.id, id)
        .await?;

    Ok(Json(note.into()))
}
