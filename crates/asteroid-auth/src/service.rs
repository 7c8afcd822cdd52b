//! Authenticator implementation.

use crate::{errors::*, traits::ChallengeAuthenticator};
use asteroid_crypto::{decode_nonce, parse_public_key_pem, verify_nonce_signature};
use asteroid_identity::{IdentityError, IdentityStore, User};
use asteroid_storage::{OpContext, RepositoryError};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Challenge-response authenticator over an [`IdentityStore`]
pub struct Authenticator<I>
where
    I: IdentityStore,
{
    identities: Arc<I>,
}

impl<I> Authenticator<I>
where
    I: IdentityStore,
{
    pub fn new(identities: Arc<I>) -> Self {
        Self { identities }
    }

    fn verify(user: &User, signature: &[u8]) -> Result<()> {
        let public_key = parse_public_key_pem(&user.public_key)
            .map_err(|e| AuthError::MalformedPublicKey(e.to_string()))?;
        let nonce =
            decode_nonce(&user.nonce).map_err(|e| AuthError::MalformedNonce(e.to_string()))?;

        verify_nonce_signature(&public_key, &nonce, signature)
            .map_err(|_| AuthError::SignatureInvalid)
    }
}

#[async_trait]
impl<I> ChallengeAuthenticator for Authenticator<I>
where
    I: IdentityStore,
{
    async fn authenticate(
        &self,
        ctx: &OpContext,
        identity_id: Uuid,
        signature: &[u8],
    ) -> Result<User> {
        let user = self
            .identities
            .find_user(ctx, identity_id)
            .await
            .map_err(|e| match e {
                IdentityError::NotFound(id) => AuthError::IdentityNotFound(id),
                // Some other record lives under this id
                IdentityError::Repository(RepositoryError::DecodeFailed(_)) => {
                    AuthError::IdentityNotFound(identity_id)
                }
                other => AuthError::StoreUnavailable(other),
            })
            .map_err(|e| {
                warn!(identity_id = %identity_id, error = %e, "Authentication rejected");
                e
            })?;

        if let Err(e) = Self::verify(&user, signature) {
            warn!(identity_id = %identity_id, error = %e, "Authentication rejected");
            return Err(e);
        }

        let rotated = self
            .identities
            .rotate_nonce(ctx, identity_id, &user.nonce)
            .await
            .map_err(|e| {
                warn!(identity_id = %identity_id, error = %e, "Nonce rotation failed after valid signature");
                AuthError::NonceRotationFailed(e)
            })?;

        info!(identity_id = %identity_id, "User authenticated");
        Ok(rotated)
    }
}
