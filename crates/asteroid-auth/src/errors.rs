//! Authentication error types.

use asteroid_identity::IdentityError;
use thiserror::Error;
use uuid::Uuid;

/// Authentication errors
#[derive(Debug, Error)]
pub enum AuthError {
    /// No user with this id
    #[error("Identity not found: {0}")]
    IdentityNotFound(Uuid),

    /// Stored public key could not be parsed
    #[error("Malformed public key: {0}")]
    MalformedPublicKey(String),

    /// Stored nonce could not be decoded
    #[error("Malformed nonce: {0}")]
    MalformedNonce(String),

    /// Signature does not match the current nonce
    #[error("Signature invalid")]
    SignatureInvalid,

    /// Signature was valid but the nonce could not be consumed
    #[error("Nonce rotation failed: {0}")]
    NonceRotationFailed(#[source] IdentityError),

    /// Identity lookup failed for infrastructure reasons
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[source] IdentityError),
}

impl AuthError {
    /// Failures the transport must not tell apart
    pub fn is_credential_failure(&self) -> bool {
        matches!(
            self,
            AuthError::IdentityNotFound(_)
                | AuthError::MalformedPublicKey(_)
                | AuthError::MalformedNonce(_)
                | AuthError::SignatureInvalid
        )
    }
}

/// Result type for authentication
pub type Result<T> = std::result::Result<T, AuthError>;
