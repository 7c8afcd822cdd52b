//! Fixed RSA key pairs for tests.

/// Alice's PKCS#1 private key
pub const ALICE_PRIVATE_PEM: &str = include_str!("../testdata/alice-private.pem");

/// Alice's PKCS#1 public key
pub const ALICE_PUBLIC_PEM: &str = include_str!("../testdata/alice-public.pem");

/// Mallory's PKCS#1 private key
pub const MALLORY_PRIVATE_PEM: &str = include_str!("../testdata/mallory-private.pem");

/// Mallory's PKCS#1 public key
pub const MALLORY_PUBLIC_PEM: &str = include_str!("../testdata/mallory-public.pem");
