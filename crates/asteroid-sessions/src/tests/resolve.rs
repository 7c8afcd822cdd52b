//! Token to identity resolution tests.

use super::helpers::*;
use crate::*;
use asteroid_storage::OpContext;
use uuid::Uuid;

#[tokio::test]
async fn test_resolve_returns_live_user() {
    let identities = create_test_identities();
    let service = create_test_session_service(identities.clone());
    let user = create_test_user(&identities).await;
    let session = service.issue(&user).unwrap();

    let resolved = service
        .resolve(&OpContext::default(), &session.token)
        .await
        .unwrap();

    assert_eq!(resolved.id, user.id);
}

#[tokio::test]
async fn test_resolve_unknown_subject() {
    let service = create_test_session_service(create_test_identities());
    let token = service
        .sign(&Claims {
            sub: Uuid::new_v4().to_string(),
            exp: now() + 60,
            orig_iat: now(),
        })
        .unwrap();

    let err = service
        .resolve(&OpContext::default(), &token)
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::IdentityNotFound(_)));
}

#[tokio::test]
async fn test_resolve_non_uuid_subject() {
    let service = create_test_session_service(create_test_identities());
    let token = service
        .sign(&Claims {
            sub: "admin".to_string(),
            exp: now() + 60,
            orig_iat: now(),
        })
        .unwrap();

    let err = service
        .resolve(&OpContext::default(), &token)
        .await
        .unwrap_err();
    assert!(matches!(err, SessionError::InvalidToken));
}
