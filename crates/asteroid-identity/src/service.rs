//! Identity store over the document repository.

use crate::{errors::*, traits::IdentityStore, types::User};
use asteroid_crypto::{generate_nonce, parse_public_key_pem};
use asteroid_storage::{DocumentRepository, OpContext};
use async_trait::async_trait;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Identity store backed by a [`DocumentRepository`]
///
/// Read-modify-write operations on a user are serialized per identity within
/// this process.
pub struct IdentityService {
    repository: Arc<DocumentRepository>,
    locks: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl IdentityService {
    pub fn new(repository: Arc<DocumentRepository>) -> Self {
        Self {
            repository,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Wait for exclusive access to one identity, bounded by `ctx`
    async fn lock_identity(&self, ctx: &OpContext, id: Uuid) -> Result<OwnedMutexGuard<()>> {
        let guard = ctx
            .run("lock", &id.to_string(), async {
                let lock = {
                    let mut locks = self.locks.lock().await;
                    if !locks.contains_key(&id) {
                        // Drop locks nobody is holding or waiting on
                        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
                    }
                    locks.entry(id).or_default().clone()
                };
                Ok(lock.lock_owned().await)
            })
            .await?;
        Ok(guard)
    }

    async fn save(&self, ctx: &OpContext, user: &User) -> Result<()> {
        self.repository
            .update(ctx, &user.id.to_string(), user)
            .await
            .map_err(|e| IdentityError::from_read(user.id, e))?;
        Ok(())
    }
}

#[async_trait]
impl IdentityStore for IdentityService {
    async fn create_user(&self, ctx: &OpContext, public_key_pem: &str) -> Result<User> {
        parse_public_key_pem(public_key_pem)
            .map_err(|e| IdentityError::MalformedPublicKey(e.to_string()))?;

        let now = chrono::Utc::now().timestamp();
        let user = User {
            id: Uuid::new_v4(),
            public_key: public_key_pem.to_string(),
            nonce: generate_nonce()?,
            is_admin: false,
            created_at: now,
            updated_at: now,
            notes: Vec::new(),
        };

        self.repository
            .create(ctx, &user, Some(user.id.to_string()))
            .await?;

        info!(identity_id = %user.id, "User created");
        Ok(user)
    }

    async fn find_user(&self, ctx: &OpContext, id: Uuid) -> Result<User> {
        self.repository
            .read_as::<User>(ctx, &id.to_string())
            .await
            .map_err(|e| IdentityError::from_read(id, e))
    }

    async fn rotate_nonce(&self, ctx: &OpContext, id: Uuid, consumed_nonce: &str) -> Result<User> {
        let _guard = self.lock_identity(ctx, id).await?;

        let mut user = self.find_user(ctx, id).await?;
        if user.nonce != consumed_nonce {
            warn!(identity_id = %id, "Nonce already rotated by a concurrent login");
            return Err(IdentityError::NonceConflict(id));
        }

        user.nonce = generate_nonce()?;
        user.updated_at = chrono::Utc::now().timestamp();
        self.save(ctx, &user).await?;

        debug!(identity_id = %id, "Nonce rotated");
        Ok(user)
    }

    async fn append_note(&self, ctx: &OpContext, id: Uuid, note_id: Uuid) -> Result<User> {
        let _guard = self.lock_identity(ctx, id).await?;

        let mut user = self.find_user(ctx, id).await?;
        user.notes.push(note_id);
        user.updated_at = chrono::Utc::now().timestamp();
        self.save(ctx, &user).await?;

        debug!(identity_id = %id, note_id = %note_id, "Note appended to owner");
        Ok(user)
    }
}
