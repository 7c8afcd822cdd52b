//! Sizes and PEM labels.

/// Bytes of entropy drawn for each nonce
pub const NONCE_ENTROPY_SIZE: usize = 64;

/// Size of the transmitted nonce (a SHA-256 digest)
pub const NONCE_SIZE: usize = 32;

/// PKCS#1 public key PEM label
pub const PUBLIC_KEY_PEM_LABEL: &str = "RSA PUBLIC KEY";

/// PKCS#1 private key PEM label
pub const PRIVATE_KEY_PEM_LABEL: &str = "RSA PRIVATE KEY";
