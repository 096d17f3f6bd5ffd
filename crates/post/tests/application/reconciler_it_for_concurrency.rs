// crates/post/tests/application/reconciler_it_for_concurrency.rs

use std::time::Duration;
use post::application::reconcile_post_event::{ReconcileError, ReconcileOutcome};
use post::domain::repositories::FileStorageStub;
use shared_kernel::domain::value_objects::UserId;

use crate::fixture::{attachment, Harness};

#[tokio::test]
async fn test_one_worker_per_post_at_a_time() {
    let h = Harness::with_storage(FileStorageStub::new().with_delete_delay(Duration::from_millis(150)));
    let owner = UserId::new();
    let post_id = h
        .service
        .create(owner, "contended", vec![attachment("a.png"), attachment("b.png")], vec![])
        .await
        .unwrap();
    h.drain().await;

    h.service.delete(post_id, owner).await.unwrap();
    let payload = h.pending_payloads().remove(0);
    let peer = h.peer_reconciler();

    // Deux membres du groupe reçoivent le même message
    let (first, second) = tokio::join!(
        h.reconciler.handle_payload(&payload),
        peer.handle_payload(&payload),
    );

    let outcomes = [first, second];
    let reconciled = outcomes.iter().filter(|o| o.is_reconciled()).count();
    let skipped: Vec<_> = outcomes.iter().filter(|o| o.is_skipped()).collect();

    assert_eq!(reconciled, 1);
    assert_eq!(skipped.len(), 1);
    assert!(matches!(
        skipped[0],
        ReconcileOutcome::Skipped(ReconcileError::LockUnavailable { .. })
    ));
    // Seul le détenteur du lease a touché l'object store
    assert_eq!(h.storage.delete_calls(), 2);
    assert!(h.storage.is_empty());
}

#[tokio::test]
async fn test_lease_is_free_after_reconciliation() {
    let h = Harness::new();
    let owner = UserId::new();
    let post_id = h.service.create(owner, "v1", vec![attachment("a.png")], vec![]).await.unwrap();
    h.drain().await;

    h.service.update(post_id, owner, "v2", vec![], vec![]).await.unwrap();
    h.service.update(post_id, owner, "v3", vec![], vec![]).await.unwrap();

    // Messages successifs sur le même post : aucun n'est sauté
    let outcomes = h.drain().await;

    assert_eq!(outcomes, vec![ReconcileOutcome::Reconciled, ReconcileOutcome::Reconciled]);
    assert!(h.storage.is_empty());
}
