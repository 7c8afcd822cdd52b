//! PKCS#1 PEM key parsing.

use crate::{constants::*, errors::*};
use rsa::{
    pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey},
    RsaPrivateKey, RsaPublicKey,
};

/// Parse an `RSA PUBLIC KEY` PEM block
pub fn parse_public_key_pem(pem: &str) -> Result<RsaPublicKey> {
    let pem = normalize(pem);
    require_label(&pem, PUBLIC_KEY_PEM_LABEL)?;
    RsaPublicKey::from_pkcs1_pem(&pem).map_err(|e| CryptoError::InvalidKey(e.to_string()))
}

/// Parse an `RSA PRIVATE KEY` PEM block
pub fn parse_private_key_pem(pem: &str) -> Result<RsaPrivateKey> {
    let pem = normalize(pem);
    require_label(&pem, PRIVATE_KEY_PEM_LABEL)?;
    RsaPrivateKey::from_pkcs1_pem(&pem).map_err(|e| CryptoError::InvalidKey(e.to_string()))
}

// Keys pasted from other platforms arrive with CRLF line endings
fn normalize(pem: &str) -> String {
    let mut pem = pem.trim().replace('\r', "");
    pem.push('\n');
    pem
}

fn require_label(pem: &str, label: &str) -> Result<()> {
    if pem.starts_with(&format!("-----BEGIN {}-----", label)) {
        Ok(())
    } else {
        Err(CryptoError::InvalidKey(format!(
            "expected a PEM block labeled {}",
            label
        )))
    }
}
