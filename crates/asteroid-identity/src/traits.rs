//! Identity store trait definitions.

use crate::{errors::Result, types::User};
use asteroid_storage::OpContext;
use async_trait::async_trait;
use uuid::Uuid;

/// Persistent user identities
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Register a new user with a fresh nonce
    ///
    /// The key is validated before anything is written.
    async fn create_user(&self, ctx: &OpContext, public_key_pem: &str) -> Result<User>;

    /// Look up a user by id
    async fn find_user(&self, ctx: &OpContext, id: Uuid) -> Result<User>;

    /// Replace `consumed_nonce` with a fresh one
    ///
    /// Fails with `NonceConflict` if the stored nonce is no longer
    /// `consumed_nonce`, so at most one caller consumes each nonce.
    async fn rotate_nonce(&self, ctx: &OpContext, id: Uuid, consumed_nonce: &str) -> Result<User>;

    /// Append a note id to the user's note list
    async fn append_note(&self, ctx: &OpContext, id: Uuid, note_id: Uuid) -> Result<User>;
}
