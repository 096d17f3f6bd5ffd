// crates/post/tests/application/service_it_for_ownership.rs

use shared_kernel::domain::value_objects::UserId;
use shared_kernel::errors::DomainError;

use crate::fixture::{attachment, Harness};

#[tokio::test]
async fn test_only_owner_can_update() {
    let h = Harness::new();
    let owner = UserId::new();
    let post_id = h.service.create(owner, "mine", vec![], vec![]).await.unwrap();
    h.drain().await;

    let result = h
        .service
        .update(post_id, UserId::new(), "hijack", vec![attachment("evil.png")], vec![])
        .await;

    assert!(matches!(result, Err(DomainError::PermissionDenied { .. })));
    // Rien n'est uploadé avant le contrôle de propriété
    assert_eq!(h.storage.upload_calls(), 0);
    assert!(h.pending_payloads().is_empty());
    assert_eq!(h.service.get_by_id(post_id).await.unwrap().content, "mine");
}

#[tokio::test]
async fn test_only_owner_can_delete() {
    let h = Harness::new();
    let owner = UserId::new();
    let post_id = h.service.create(owner, "mine", vec![], vec![]).await.unwrap();
    h.drain().await;

    let result = h.service.delete(post_id, UserId::new()).await;

    assert!(matches!(result, Err(DomainError::PermissionDenied { .. })));
    assert!(h.repo.get(&post_id).is_some());
    assert!(h.pending_payloads().is_empty());
}

#[tokio::test]
async fn test_unknown_post_is_not_found() {
    let h = Harness::new();
    let missing = shared_kernel::domain::value_objects::PostId::new();

    let update = h.service.update(missing, UserId::new(), "x", vec![], vec![]).await;
    let delete = h.service.delete(missing, UserId::new()).await;

    assert!(matches!(update, Err(DomainError::NotFound { .. })));
    assert!(matches!(delete, Err(DomainError::NotFound { .. })));
}
