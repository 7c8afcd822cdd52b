//! Nonce challenge generation.

use crate::{constants::*, errors::*};
use base64::{engine::general_purpose::STANDARD, Engine};
use rand::{rngs::OsRng, RngCore};
use sha2::{Digest, Sha256};

/// Generate a fresh login challenge
///
/// Draws [`NONCE_ENTROPY_SIZE`] bytes from the OS RNG and returns the standard
/// base64 encoding of their SHA-256 digest.
pub fn generate_nonce() -> Result<String> {
    let mut entropy = [0u8; NONCE_ENTROPY_SIZE];
    OsRng
        .try_fill_bytes(&mut entropy)
        .map_err(|e| CryptoError::RandomGenerationFailed(e.to_string()))?;

    let digest = Sha256::digest(entropy);
    Ok(STANDARD.encode(digest))
}

/// Decode a transmitted nonce back into its digest bytes
pub fn decode_nonce(nonce: &str) -> Result<[u8; NONCE_SIZE]> {
    let bytes = STANDARD
        .decode(nonce.trim())
        .map_err(|e| CryptoError::InvalidNonce(e.to_string()))?;

    bytes.try_into().map_err(|bytes: Vec<u8>| {
        CryptoError::InvalidNonce(format!(
            "expected {} bytes, got {}",
            NONCE_SIZE,
            bytes.len()
        ))
    })
}
