//! Note error types.

use asteroid_identity::IdentityError;
use asteroid_storage::RepositoryError;
use thiserror::Error;
use uuid::Uuid;

/// Note service errors
#[derive(Debug, Error)]
pub enum NoteError {
    /// Note text is empty
    #[error("Note text is empty")]
    EmptyNote,

    /// No note with this id
    #[error("Note not found: {0}")]
    NotFound(Uuid),

    /// Caller does not own the note
    #[error("Access to note {0} is forbidden")]
    Forbidden(Uuid),

    /// Owner identity does not exist
    #[error("Owner not found: {0}")]
    OwnerNotFound(Uuid),

    /// Stored document is not a note
    #[error("Note decode failed: {0}")]
    DecodeFailed(String),

    /// Identity store error
    #[error("Identity error: {0}")]
    Identity(#[from] IdentityError),

    /// Repository error
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl NoteError {
    pub(crate) fn from_read(id: Uuid, err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(_) => NoteError::NotFound(id),
            RepositoryError::DecodeFailed(reason) => NoteError::DecodeFailed(reason),
            other => NoteError::Repository(other),
        }
    }
}

/// Result type for note operations
pub type Result<T> = std::result::Result<T, NoteError>;
