// crates/post/tests/application/post_lifecycle_it.rs

use post::application::cache_keys;
use post::application::reconcile_post_event::ReconcileOutcome;
use post::domain::value_objects::FileGroup;
use shared_kernel::domain::value_objects::UserId;
use shared_kernel::errors::DomainError;

use crate::fixture::{attachment, Harness};

#[tokio::test]
async fn test_post_lifecycle_leaves_no_orphan() {
    let h = Harness::new();
    let owner = UserId::new();

    // 1. Création avec une image et un document
    let post_id = h
        .service
        .create(owner, "hello", vec![attachment("a.png")], vec![attachment("doc.pdf")])
        .await
        .expect("create failed");
    assert_eq!(h.drain().await, vec![ReconcileOutcome::Reconciled]);
    assert_eq!(h.storage.len(), 2);

    let view = h.service.get_by_id(post_id).await.unwrap();
    let a = FileGroup::flatten(&view.media).remove(0);
    let doc = FileGroup::flatten(&view.files).remove(0);
    assert_eq!(view.content, "hello");

    // 2. Remplacement complet : l'image change, le document disparaît
    h.service
        .update(post_id, owner, "edited", vec![attachment("b.png")], vec![])
        .await
        .expect("update failed");
    assert_eq!(h.drain().await, vec![ReconcileOutcome::Reconciled]);

    assert_eq!(h.storage.deleted(), vec![a.clone(), doc.clone()]);
    let cached = h.cache.peek(&cache_keys::post(&post_id)).expect("cache should be refilled");
    assert!(cached.contains("edited"));

    let view = h.service.get_by_id(post_id).await.unwrap();
    let b = FileGroup::flatten(&view.media).remove(0);
    assert!(view.files.is_empty());
    assert!(h.storage.contains(&b));

    // 3. Suppression : plus aucun objet, plus d'entrée en cache
    h.service.delete(post_id, owner).await.expect("delete failed");
    assert_eq!(h.drain().await, vec![ReconcileOutcome::Reconciled]);

    assert!(h.storage.is_empty());
    assert!(h.cache.peek(&cache_keys::post(&post_id)).is_none());
    assert!(matches!(
        h.service.get_by_id(post_id).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_reupload_orphans_only_the_previous_object() {
    let h = Harness::new();
    let owner = UserId::new();
    let post_id = h
        .service
        .create(owner, "v1", vec![attachment("keep.png")], vec![])
        .await
        .unwrap();
    h.drain().await;

    // Même nom de fichier, nouvel objet : seule l'ancienne URL est orpheline
    h.service
        .update(post_id, owner, "v2", vec![attachment("keep.png")], vec![])
        .await
        .unwrap();
    h.drain().await;

    let view = h.service.get_by_id(post_id).await.unwrap();
    let current = FileGroup::flatten(&view.media);
    assert_eq!(current.len(), 1);
    assert!(h.storage.contains(&current[0]));
    assert_eq!(h.storage.len(), 1);
    assert!(!h.storage.deleted().contains(&current[0]));
}

#[tokio::test]
async fn test_replaying_delete_is_idempotent() {
    let h = Harness::new();
    let owner = UserId::new();
    let post_id = h
        .service
        .create(owner, "bye", vec![attachment("x.png")], vec![])
        .await
        .unwrap();
    h.drain().await;

    h.service.delete(post_id, owner).await.unwrap();
    let delete_payload = h.pending_payloads().remove(0);
    h.drain().await;

    // Redelivery at-least-once
    let replay = h.reconciler.handle_payload(&delete_payload).await;

    assert_eq!(replay, ReconcileOutcome::Reconciled);
    assert!(h.storage.is_empty());
    assert_eq!(h.storage.deleted().len(), 1);
}

#[tokio::test]
async fn test_failed_upload_leaves_post_untouched() {
    let h = Harness::new();
    let owner = UserId::new();
    let post_id = h.service.create(owner, "stable", vec![], vec![]).await.unwrap();
    h.drain().await;
    h.storage.fail_upload_of("broken.png");

    let result = h
        .service
        .update(post_id, owner, "never", vec![attachment("broken.png")], vec![])
        .await;

    assert!(matches!(result, Err(DomainError::UploadFailed { .. })));
    assert!(h.pending_payloads().is_empty());
    assert_eq!(h.service.get_by_id(post_id).await.unwrap().content, "stable");
}

#[tokio::test]
async fn test_broker_outage_does_not_fail_mutation() {
    let h = Harness::new();
    h.producer.set_failing(true);

    let post_id = h.service.create(UserId::new(), "offline", vec![], vec![]).await;

    assert!(post_id.is_ok());
    assert!(h.producer.published().is_empty());
}
