//! RSA-PSS signatures over nonce digests.
//!
//! The nonce is already a SHA-256 digest, so it is signed directly as the
//! hashed message. Verification detects the salt length, so signers may use
//! any salt from zero up to the maximum the key size allows.

use crate::{constants::*, errors::*, keys::parse_private_key_pem, nonce::decode_nonce};
use rand::rngs::OsRng;
use rsa::{traits::PublicKeyParts, Pss, RsaPublicKey};
use sha2::Sha256;

/// Verify a PSS signature over a decoded nonce
///
/// Any salt length the key size admits is accepted. The digest-length and
/// maximum salts are tried first.
pub fn verify_nonce_signature(
    public_key: &RsaPublicKey,
    nonce: &[u8; NONCE_SIZE],
    signature: &[u8],
) -> Result<()> {
    let max = max_salt_len(public_key).ok_or(CryptoError::SignatureVerificationFailed)?;

    let preferred = [NONCE_SIZE, max].into_iter().filter(|salt| *salt <= max);
    let remaining = (0..=max).filter(|salt| *salt != NONCE_SIZE && *salt != max);

    preferred
        .chain(remaining)
        .any(|salt| {
            public_key
                .verify(Pss::new_with_salt::<Sha256>(salt), nonce, signature)
                .is_ok()
        })
        .then_some(())
        .ok_or(CryptoError::SignatureVerificationFailed)
}

/// Sign a base64 nonce with a PKCS#1 private key
///
/// Client-side counterpart of [`verify_nonce_signature`].
pub fn sign_nonce(private_key_pem: &str, nonce: &str) -> Result<Vec<u8>> {
    let key = parse_private_key_pem(private_key_pem)?;
    let digest = decode_nonce(nonce)?;

    key.sign_with_rng(&mut OsRng, Pss::new::<Sha256>(), &digest)
        .map_err(|e| CryptoError::SigningFailed(e.to_string()))
}

fn max_salt_len(public_key: &RsaPublicKey) -> Option<usize> {
    let em_bits = public_key.n().bits().checked_sub(1)?;
    let em_len = (em_bits + 7) / 8;
    em_len.checked_sub(NONCE_SIZE + 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        keys::parse_public_key_pem,
        nonce::generate_nonce,
        testing::{ALICE_PRIVATE_PEM, ALICE_PUBLIC_PEM, MALLORY_PRIVATE_PEM},
    };

    #[test]
    fn test_sign_and_verify() {
        let nonce = generate_nonce().unwrap();
        let signature = sign_nonce(ALICE_PRIVATE_PEM, &nonce).unwrap();

        let key = parse_public_key_pem(ALICE_PUBLIC_PEM).unwrap();
        verify_nonce_signature(&key, &decode_nonce(&nonce).unwrap(), &signature).unwrap();
    }

    #[test]
    fn test_max_salt_signature_verifies() {
        let nonce = generate_nonce().unwrap();
        let digest = decode_nonce(&nonce).unwrap();
        let key = parse_public_key_pem(ALICE_PUBLIC_PEM).unwrap();
        let max = max_salt_len(&key).unwrap();
        assert_eq!(max, 222);

        let signature = parse_private_key_pem(ALICE_PRIVATE_PEM)
            .unwrap()
            .sign_with_rng(&mut OsRng, Pss::new_with_salt::<Sha256>(max), &digest)
            .unwrap();

        verify_nonce_signature(&key, &digest, &signature).unwrap();
    }

    #[test]
    fn test_any_salt_length_verifies() {
        let nonce = generate_nonce().unwrap();
        let digest = decode_nonce(&nonce).unwrap();
        let private_key = parse_private_key_pem(ALICE_PRIVATE_PEM).unwrap();
        let key = parse_public_key_pem(ALICE_PUBLIC_PEM).unwrap();

        for salt in [0, 20, 64] {
            let signature = private_key
                .sign_with_rng(&mut OsRng, Pss::new_with_salt::<Sha256>(salt), &digest)
                .unwrap();
            assert!(
                verify_nonce_signature(&key, &digest, &signature).is_ok(),
                "salt {salt} rejected"
            );
        }
    }

    #[test]
    fn test_wrong_key_fails() {
        let nonce = generate_nonce().unwrap();
        let signature = sign_nonce(MALLORY_PRIVATE_PEM, &nonce).unwrap();

        let key = parse_public_key_pem(ALICE_PUBLIC_PEM).unwrap();
        assert!(matches!(
            verify_nonce_signature(&key, &decode_nonce(&nonce).unwrap(), &signature),
            Err(CryptoError::SignatureVerificationFailed)
        ));
    }

    #[test]
    fn test_other_nonce_fails() {
        let signed = generate_nonce().unwrap();
        let current = generate_nonce().unwrap();
        let signature = sign_nonce(ALICE_PRIVATE_PEM, &signed).unwrap();

        let key = parse_public_key_pem(ALICE_PUBLIC_PEM).unwrap();
        assert!(verify_nonce_signature(&key, &decode_nonce(&current).unwrap(), &signature).is_err());
    }

    #[test]
    fn test_garbage_signature_fails() {
        let nonce = generate_nonce().unwrap();
        let key = parse_public_key_pem(ALICE_PUBLIC_PEM).unwrap();
        assert!(verify_nonce_signature(&key, &decode_nonce(&nonce).unwrap(), b"junk").is_err());
    }
}
