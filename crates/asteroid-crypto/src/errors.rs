//! Cryptographic error types.

use thiserror::Error;

/// Cryptographic operation errors
#[derive(Debug, Error)]
pub enum CryptoError {
    /// PEM block missing, mislabeled or not a PKCS#1 RSA key
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Nonce is not base64 or has the wrong length
    #[error("Invalid nonce: {0}")]
    InvalidNonce(String),

    /// Signature does not verify under the key
    #[error("Signature verification failed")]
    SignatureVerificationFailed,

    /// Signing failed
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    /// Random number generation failed
    #[error("Random number generation failed: {0}")]
    RandomGenerationFailed(String),
}

/// Result type for cryptographic operations
pub type Result<T> = std::result::Result<T, CryptoError>;
