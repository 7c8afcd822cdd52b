//! Identity error types.

use asteroid_crypto::CryptoError;
use asteroid_storage::RepositoryError;
use thiserror::Error;
use uuid::Uuid;

/// Identity store errors
#[derive(Debug, Error)]
pub enum IdentityError {
    /// No user with this id
    #[error("User not found: {0}")]
    NotFound(Uuid),

    /// Public key is not a PKCS#1 `RSA PUBLIC KEY` PEM block
    #[error("Malformed public key: {0}")]
    MalformedPublicKey(String),

    /// The nonce was rotated by someone else since it was read
    #[error("Nonce for user {0} was already consumed")]
    NonceConflict(Uuid),

    /// Cryptographic error
    #[error("Cryptographic error: {0}")]
    Crypto(#[from] CryptoError),

    /// Repository error
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl IdentityError {
    pub(crate) fn from_read(id: Uuid, err: RepositoryError) -> Self {
        if err.is_not_found() {
            IdentityError::NotFound(id)
        } else {
            IdentityError::Repository(err)
        }
    }
}

/// Result type for identity operations
pub type Result<T> = std::result::Result<T, IdentityError>;
