use asteroid_identity::IdentityError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Refresh window expired")]
    RefreshWindowExpired,

    #[error("Identity not found: {0}")]
    IdentityNotFound(Uuid),

    #[error("Identity error: {0}")]
    Identity(#[source] IdentityError),

    #[error("JWT encoding error: {0}")]
    JwtEncodingError(#[from] jsonwebtoken::errors::Error),
}

impl From<IdentityError> for SessionError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::NotFound(id) => SessionError::IdentityNotFound(id),
            other => SessionError::Identity(other),
        }
    }
}

impl SessionError {
    /// Missing, forged or expired credential
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            SessionError::InvalidToken
                | SessionError::TokenExpired
                | SessionError::RefreshWindowExpired
                | SessionError::IdentityNotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
