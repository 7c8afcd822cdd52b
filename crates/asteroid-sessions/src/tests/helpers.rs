//! Test helpers for session service tests.

use crate::*;
use asteroid_crypto::testing::ALICE_PUBLIC_PEM;
use asteroid_identity::{IdentityService, IdentityStore, User};
use asteroid_storage::{DocumentRepository, MemoryLogStore, OpContext};
use std::sync::Arc;

pub const TEST_SECRET: [u8; 32] = [42u8; 32];

pub fn create_test_identities() -> Arc<IdentityService> {
    let store = Arc::new(MemoryLogStore::new("default"));
    Arc::new(IdentityService::new(Arc::new(DocumentRepository::new(store))))
}

pub fn create_test_session_service(
    identities: Arc<IdentityService>,
) -> SessionService<IdentityService> {
    SessionService::new(identities, TEST_SECRET.to_vec())
}

pub async fn create_test_user(identities: &IdentityService) -> User {
    identities
        .create_user(&OpContext::default(), ALICE_PUBLIC_PEM)
        .await
        .unwrap()
}

pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}
