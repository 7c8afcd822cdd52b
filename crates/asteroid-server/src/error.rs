use asteroid_auth::AuthError;
use asteroid_identity::IdentityError;
use asteroid_notes::NoteError;
use asteroid_sessions::SessionError;
use asteroid_storage::RepositoryError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// API error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Missing or invalid credentials of any kind
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// A concurrent login consumed the nonce first
    #[error("Nonce conflict")]
    NonceConflict,

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Store timeout")]
    Timeout,

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg, None),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Missing or invalid credentials".to_string(),
                None,
            ),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg, None),
            ApiError::NonceConflict => (
                StatusCode::CONFLICT,
                "NONCE_CONFLICT",
                "Nonce was already used, fetch the current nonce and sign again".to_string(),
                None,
            ),
            ApiError::ServiceUnavailable(msg) => {
                tracing::warn!("Service unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "SERVICE_UNAVAILABLE",
                    "Storage is unavailable".to_string(),
                    None,
                )
            }
            ApiError::Timeout => (
                StatusCode::GATEWAY_TIMEOUT,
                "STORE_TIMEOUT",
                "Storage did not respond in time".to_string(),
                None,
            ),
            ApiError::Internal(err) => {
                tracing::error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: ErrorDetails {
                code: code.to_string(),
                message,
                details,
            },
        });

        (status, body).into_response()
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(key) => ApiError::NotFound(format!("No document {}", key)),
            RepositoryError::Timeout { .. } => ApiError::Timeout,
            err @ (RepositoryError::StoreUnavailable(_)
            | RepositoryError::Canceled { .. }
            | RepositoryError::WriteFailed { .. }
            | RepositoryError::LoadFailed { .. }) => ApiError::ServiceUnavailable(err.to_string()),
            other => ApiError::Internal(other.into()),
        }
    }
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::NotFound(_) => ApiError::NotFound("User not found".to_string()),
            IdentityError::MalformedPublicKey(reason) => {
                ApiError::InvalidRequest(format!("Malformed public key: {}", reason))
            }
            IdentityError::NonceConflict(_) => ApiError::NonceConflict,
            IdentityError::Repository(err) => err.into(),
            other => ApiError::Internal(other.into()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        if err.is_credential_failure() {
            return ApiError::Unauthorized;
        }
        match err {
            AuthError::NonceRotationFailed(inner) | AuthError::StoreUnavailable(inner) => {
                inner.into()
            }
            other => ApiError::Internal(other.into()),
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        if err.is_unauthorized() {
            return ApiError::Unauthorized;
        }
        match err {
            SessionError::Identity(inner) => inner.into(),
            other => ApiError::Internal(other.into()),
        }
    }
}

impl From<NoteError> for ApiError {
    fn from(err: NoteError) -> Self {
        match err {
            NoteError::EmptyNote => ApiError::InvalidRequest("Note text is empty".to_string()),
            NoteError::NotFound(_) => ApiError::NotFound("Note not found".to_string()),
            NoteError::Forbidden(_) => {
                ApiError::Forbidden("Note belongs to another user".to_string())
            }
            NoteError::OwnerNotFound(_) => ApiError::NotFound("Owner not found".to_string()),
            NoteError::Identity(inner) => inner.into(),
            NoteError::Repository(inner) => inner.into(),
            other => ApiError::Internal(other.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asteroid_storage::StorageError;
    use std::time::Duration;
    use uuid::Uuid;

    fn status(err: impl Into<ApiError>) -> StatusCode {
        err.into().into_response().status()
    }

    #[test]
    fn test_credential_failures_look_alike() {
        let not_found = status(AuthError::IdentityNotFound(Uuid::new_v4()));
        let bad_signature = status(AuthError::SignatureInvalid);
        let bad_key = status(AuthError::MalformedPublicKey("x".into()));

        assert_eq!(not_found, StatusCode::UNAUTHORIZED);
        assert_eq!(bad_signature, StatusCode::UNAUTHORIZED);
        assert_eq!(bad_key, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_rotation_conflict_is_409() {
        let err = AuthError::NonceRotationFailed(IdentityError::NonceConflict(Uuid::new_v4()));
        assert_eq!(status(err), StatusCode::CONFLICT);
    }

    #[test]
    fn test_store_failures() {
        let timeout = RepositoryError::Timeout {
            op: "read",
            key: "k".into(),
            timeout: Duration::from_secs(1),
        };
        assert_eq!(status(timeout), StatusCode::GATEWAY_TIMEOUT);

        let closed = RepositoryError::StoreUnavailable(StorageError::Closed);
        assert_eq!(status(closed), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_forbidden_note() {
        assert_eq!(status(NoteError::Forbidden(Uuid::new_v4())), StatusCode::FORBIDDEN);
    }
}
