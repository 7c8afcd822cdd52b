//! Note service implementation.

use crate::{errors::*, traits::NoteStore, types::Note};
use asteroid_identity::{IdentityError, IdentityStore};
use asteroid_storage::{DocumentRepository, OpContext};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Note service over a [`DocumentRepository`] and an [`IdentityStore`]
pub struct NoteService<I>
where
    I: IdentityStore,
{
    repository: Arc<DocumentRepository>,
    identities: Arc<I>,
}

impl<I> NoteService<I>
where
    I: IdentityStore,
{
    pub fn new(repository: Arc<DocumentRepository>, identities: Arc<I>) -> Self {
        Self {
            repository,
            identities,
        }
    }

    async fn discard(&self, ctx: &OpContext, note_id: Uuid) {
        // Runs after a failed request, so it gets its own cancellation scope
        let ctx = OpContext::new(ctx.timeout());
        match self.repository.delete(&ctx, &note_id.to_string()).await {
            Ok(()) => info!(note_id = %note_id, "Orphaned note removed"),
            Err(e) => error!(note_id = %note_id, error = %e, "Failed to remove orphaned note"),
        }
    }
}

#[async_trait]
impl<I> NoteStore for NoteService<I>
where
    I: IdentityStore,
{
    async fn create_note(&self, ctx: &OpContext, owner_id: Uuid, text: &str) -> Result<Note> {
        if text.trim().is_empty() {
            return Err(NoteError::EmptyNote);
        }

        self.identities
            .find_user(ctx, owner_id)
            .await
            .map_err(|e| match e {
                IdentityError::NotFound(id) => NoteError::OwnerNotFound(id),
                other => NoteError::Identity(other),
            })?;

        let note = Note {
            id: Uuid::new_v4(),
            uid: owner_id,
            data: text.to_string(),
        };
        self.repository
            .create(ctx, &note, Some(note.id.to_string()))
            .await?;

        if let Err(e) = self.identities.append_note(ctx, owner_id, note.id).await {
            warn!(
                note_id = %note.id,
                identity_id = %owner_id,
                error = %e,
                "Owner update failed, discarding note"
            );
            self.discard(ctx, note.id).await;
            return Err(NoteError::Identity(e));
        }

        info!(note_id = %note.id, identity_id = %owner_id, "Note created");
        Ok(note)
    }

    async fn get_note(&self, ctx: &OpContext, id: Uuid) -> Result<Note> {
        self.repository
            .read_as::<Note>(ctx, &id.to_string())
            .await
            .map_err(|e| NoteError::from_read(id, e))
    }

    async fn get_note_for(&self, ctx: &OpContext, caller_id: Uuid, id: Uuid) -> Result<Note> {
        let note = self.get_note(ctx, id).await?;
        if note.uid != caller_id {
            warn!(note_id = %id, identity_id = %caller_id, "Note access denied");
            return Err(NoteError::Forbidden(id));
        }
        Ok(note)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asteroid_crypto::testing::{ALICE_PUBLIC_PEM, MALLORY_PUBLIC_PEM};
    use asteroid_identity::{IdentityService, User};
    use asteroid_storage::{GetOptions, LoadDepth, MemoryLogStore, RepositoryError, Store};
    use std::time::Duration;

    struct Fixture {
        store: Arc<MemoryLogStore>,
        repository: Arc<DocumentRepository>,
        identities: Arc<IdentityService>,
        notes: Arc<NoteService<IdentityService>>,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemoryLogStore::new("default"));
        let repository = Arc::new(DocumentRepository::new(store.clone()));
        let identities = Arc::new(IdentityService::new(repository.clone()));
        let notes = Arc::new(NoteService::new(repository.clone(), identities.clone()));
        Fixture {
            store,
            repository,
            identities,
            notes,
        }
    }

    async fn user(fixture: &Fixture, pem: &str) -> User {
        fixture
            .identities
            .create_user(&OpContext::default(), pem)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_note_and_record_on_owner() {
        let fx = fixture();
        let ctx = OpContext::default();
        let owner = user(&fx, ALICE_PUBLIC_PEM).await;

        let note = fx.notes.create_note(&ctx, owner.id, "hello").await.unwrap();

        assert_eq!(fx.notes.get_note(&ctx, note.id).await.unwrap().data, "hello");
        let reloaded = fx.identities.find_user(&ctx, owner.id).await.unwrap();
        assert!(reloaded.owns_note(&note.id));
    }

    #[tokio::test]
    async fn test_owner_is_stable_across_reads() {
        let fx = fixture();
        let ctx = OpContext::default();
        let owner = user(&fx, ALICE_PUBLIC_PEM).await;
        let note = fx.notes.create_note(&ctx, owner.id, "hello").await.unwrap();

        for _ in 0..3 {
            assert_eq!(fx.notes.get_note(&ctx, note.id).await.unwrap().uid, owner.id);
        }
    }

    #[tokio::test]
    async fn test_concurrent_creates_both_recorded() {
        let fx = fixture();
        let owner = user(&fx, ALICE_PUBLIC_PEM).await;
        let owner_id = owner.id;

        let first = {
            let notes = fx.notes.clone();
            tokio::spawn(async move {
                notes
                    .create_note(&OpContext::default(), owner_id, "first")
                    .await
            })
        };
        let second = {
            let notes = fx.notes.clone();
            tokio::spawn(async move {
                notes
                    .create_note(&OpContext::default(), owner_id, "second")
                    .await
            })
        };
        let first = first.await.unwrap().unwrap();
        let second = second.await.unwrap().unwrap();

        let deadline = tokio::time::Instant::now() + Duration::from_secs(10);
        loop {
            let reloaded = fx
                .identities
                .find_user(&OpContext::default(), owner_id)
                .await
                .unwrap();
            if reloaded.owns_note(&first.id) && reloaded.owns_note(&second.id) {
                break;
            }
            assert!(tokio::time::Instant::now() < deadline, "notes never appeared");
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    }

    #[tokio::test]
    async fn test_empty_note_rejected() {
        let fx = fixture();
        let owner = user(&fx, ALICE_PUBLIC_PEM).await;

        let err = fx
            .notes
            .create_note(&OpContext::default(), owner.id, "  ")
            .await
            .unwrap_err();
        assert!(matches!(err, NoteError::EmptyNote));
    }

    #[tokio::test]
    async fn test_unknown_owner_rejected() {
        let fx = fixture();
        let err = fx
            .notes
            .create_note(&OpContext::default(), Uuid::new_v4(), "hello")
            .await
            .unwrap_err();
        assert!(matches!(err, NoteError::OwnerNotFound(_)));
    }

    #[tokio::test]
    async fn test_get_missing_note() {
        let fx = fixture();
        let err = fx
            .notes
            .get_note(&OpContext::default(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, NoteError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_get_non_note_document() {
        let fx = fixture();
        let ctx = OpContext::default();
        let id = Uuid::new_v4();
        fx.repository
            .create(&ctx, &"not a note", Some(id.to_string()))
            .await
            .unwrap();

        let err = fx.notes.get_note(&ctx, id).await.unwrap_err();
        assert!(matches!(err, NoteError::DecodeFailed(_)));
    }

    #[tokio::test]
    async fn test_other_user_is_forbidden() {
        let fx = fixture();
        let ctx = OpContext::default();
        let alice = user(&fx, ALICE_PUBLIC_PEM).await;
        let mallory = user(&fx, MALLORY_PUBLIC_PEM).await;
        let note = fx.notes.create_note(&ctx, alice.id, "secret").await.unwrap();

        let err = fx
            .notes
            .get_note_for(&ctx, mallory.id, note.id)
            .await
            .unwrap_err();
        assert!(matches!(err, NoteError::Forbidden(id) if id == note.id));
        assert!(!err.to_string().contains("secret"));

        let own = fx.notes.get_note_for(&ctx, alice.id, note.id).await.unwrap();
        assert_eq!(own.data, "secret");
    }

    /// Delegates to a real identity store but fails every owner update
    struct RejectingAppends(Arc<IdentityService>);

    #[async_trait]
    impl IdentityStore for RejectingAppends {
        async fn create_user(
            &self,
            ctx: &OpContext,
            public_key_pem: &str,
        ) -> asteroid_identity::Result<User> {
            self.0.create_user(ctx, public_key_pem).await
        }

        async fn find_user(&self, ctx: &OpContext, id: Uuid) -> asteroid_identity::Result<User> {
            self.0.find_user(ctx, id).await
        }

        async fn rotate_nonce(
            &self,
            ctx: &OpContext,
            id: Uuid,
            consumed_nonce: &str,
        ) -> asteroid_identity::Result<User> {
            self.0.rotate_nonce(ctx, id, consumed_nonce).await
        }

        async fn append_note(
            &self,
            _ctx: &OpContext,
            id: Uuid,
            _note_id: Uuid,
        ) -> asteroid_identity::Result<User> {
            Err(IdentityError::Repository(RepositoryError::NotFound(
                id.to_string(),
            )))
        }
    }

    #[tokio::test]
    async fn test_failed_owner_update_discards_note() {
        let fx = fixture();
        let ctx = OpContext::default();
        let owner = user(&fx, ALICE_PUBLIC_PEM).await;
        let notes = NoteService::new(
            fx.repository.clone(),
            Arc::new(RejectingAppends(fx.identities.clone())),
        );

        let err = notes.create_note(&ctx, owner.id, "hello").await.unwrap_err();
        assert!(matches!(err, NoteError::Identity(_)));

        // Only the owner document is still live
        let reloaded = fx.identities.find_user(&ctx, owner.id).await.unwrap();
        assert!(reloaded.notes.is_empty());
        fx.store.load(LoadDepth::Unbounded).await.unwrap();
        let live = fx.store.get("", GetOptions::partial()).await.unwrap();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].id, owner.id.to_string());
    }
}
