//! # asteroid-crypto
//!
//! Cryptographic primitives for challenge-response login.
//!
//! - Nonce challenges: 64 bytes of OS entropy hashed with SHA-256 and
//!   transmitted as standard base64 of the digest
//! - PKCS#1 PEM parsing for RSA keys
//! - RSA-PSS/SHA-256 signature verification over the nonce digest

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod constants;
pub mod errors;
pub mod keys;
pub mod nonce;
pub mod signatures;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use constants::*;
pub use errors::{CryptoError, Result};
pub use keys::{parse_private_key_pem, parse_public_key_pem};
pub use nonce::{decode_nonce, generate_nonce};
pub use signatures::{sign_nonce, verify_nonce_signature};

pub use rsa::{RsaPrivateKey, RsaPublicKey};
