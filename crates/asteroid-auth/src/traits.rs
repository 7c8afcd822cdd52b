//! Authenticator trait definitions.

use crate::errors::Result;
use asteroid_identity::User;
use asteroid_storage::OpContext;
use async_trait::async_trait;
use uuid::Uuid;

/// Nonce challenge-response login
#[async_trait]
pub trait ChallengeAuthenticator: Send + Sync {
    /// Verify `signature` over the user's current nonce and consume it
    ///
    /// Returns the user with the rotated nonce. Authentication is only
    /// successful once the rotation has been persisted.
    async fn authenticate(&self, ctx: &OpContext, identity_id: Uuid, signature: &[u8])
        -> Result<User>;
}
