#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;
    use chrono::Utc;
    use shared_kernel::domain::entities::Entity;
    use shared_kernel::domain::events::EventEnvelope;
    use shared_kernel::domain::repositories::CacheRepositoryStub;
    use shared_kernel::domain::value_objects::{PostId, Url, UserId};
    use shared_kernel::infrastructure::pagination::PageRequest;

    use crate::application::cache_keys;
    use crate::application::reconcile_post_event::{
        PostEventReconciler, ReconcileError, ReconcileOutcome, ReconcilerSettings,
    };
    use crate::application::views::PostView;
    use crate::domain::entities::Post;
    use crate::domain::events::PostEvent;
    use crate::domain::repositories::{FileStorageStub, PostRepositoryStub};
    use crate::domain::value_objects::{AttachmentKind, FileGroup};

    struct Fixture {
        reconciler: PostEventReconciler,
        repo: Arc<PostRepositoryStub>,
        cache: Arc<CacheRepositoryStub>,
        storage: Arc<FileStorageStub>,
    }

    fn setup_with(posts: Vec<Post>, storage: FileStorageStub, settings: ReconcilerSettings) -> Fixture {
        let repo = Arc::new(PostRepositoryStub::with_posts(posts));
        let cache = Arc::new(CacheRepositoryStub::new());
        let storage = Arc::new(storage);
        let reconciler = PostEventReconciler::new(repo.clone(), cache.clone(), storage.clone(), settings);
        Fixture { reconciler, repo, cache, storage }
    }

    fn setup(posts: Vec<Post>, storage: FileStorageStub) -> Fixture {
        setup_with(posts, storage, ReconcilerSettings::default())
    }

    fn post_with_media(owner: UserId, media: Vec<Url>) -> Post {
        let groups = if media.is_empty() {
            vec![]
        } else {
            vec![FileGroup::new(AttachmentKind::Image, media)]
        };
        Post::new(owner, "current", groups, vec![], Utc::now())
    }

    fn updated(post_id: PostId, old: &[Url], new: &[Url]) -> PostEvent {
        PostEvent::PostUpdated {
            post_id,
            owner_id: None,
            media_new_urls: new.to_vec(),
            media_old_urls: old.to_vec(),
            files_new_urls: vec![],
            files_old_urls: vec![],
            occurred_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_update_deletes_only_orphans_and_refills_cache() {
        // Arrange : media {a,b} → {b,c}
        let storage = FileStorageStub::new();
        let (a, b, c) = (storage.seed("a.png"), storage.seed("b.png"), storage.seed("c.png"));
        let post = post_with_media(UserId::new(), vec![b.clone(), c.clone()]);
        let post_id = *post.id();
        let fx = setup(vec![post], storage);
        fx.cache.seed(&cache_keys::post(&post_id), "stale");

        // Act
        let outcome = fx.reconciler.handle(&updated(post_id, &[a.clone(), b.clone()], &[b.clone(), c.clone()])).await;

        // Assert
        assert_eq!(outcome, ReconcileOutcome::Reconciled);
        assert_eq!(fx.storage.deleted(), vec![a]);
        assert!(fx.storage.contains(&b));
        assert!(fx.storage.contains(&c));

        let cached: PostView = serde_json::from_str(&fx.cache.peek(&cache_keys::post(&post_id)).unwrap()).unwrap();
        assert_eq!(cached.content, "current");
        assert_eq!(cached.media[0].urls, vec![b, c]);
    }

    #[tokio::test]
    async fn test_update_is_idempotent() {
        let storage = FileStorageStub::new();
        let a = storage.seed("a.png");
        let post = post_with_media(UserId::new(), vec![]);
        let post_id = *post.id();
        let fx = setup(vec![post], storage);
        let event = updated(post_id, &[a.clone()], &[]);

        let first = fx.reconciler.handle(&event).await;
        let second = fx.reconciler.handle(&event).await;

        assert!(first.is_reconciled());
        assert!(second.is_reconciled());
        assert_eq!(fx.storage.deleted(), vec![a]);
    }

    #[tokio::test]
    async fn test_held_lease_skips_without_mutation() {
        // Arrange : un autre worker détient le lease du post
        let storage = FileStorageStub::new();
        let a = storage.seed("a.png");
        let post = post_with_media(UserId::new(), vec![]);
        let post_id = *post.id();
        let fx = setup(vec![post], storage);
        fx.cache.seed(&cache_keys::post_lock(&post_id), "other-worker");
        fx.cache.seed(&cache_keys::post(&post_id), "stale");

        // Act
        let outcome = fx.reconciler.handle(&updated(post_id, &[a.clone()], &[])).await;

        // Assert
        assert!(matches!(outcome, ReconcileOutcome::Skipped(ReconcileError::LockUnavailable { .. })));
        assert!(fx.storage.contains(&a));
        assert_eq!(fx.storage.delete_calls(), 0);
        assert_eq!(fx.cache.peek(&cache_keys::post(&post_id)).as_deref(), Some("stale"));
        assert_eq!(fx.repo.fetch_calls(), 0);
    }

    #[tokio::test]
    async fn test_unrelated_posts_do_not_contend() {
        let storage = FileStorageStub::new();
        let first = post_with_media(UserId::new(), vec![]);
        let second = post_with_media(UserId::new(), vec![]);
        let (first_id, second_id) = (*first.id(), *second.id());
        let fx = setup(vec![first, second], storage);
        fx.cache.seed(&cache_keys::post_lock(&first_id), "other-worker");

        let outcome = fx.reconciler.handle(&updated(second_id, &[], &[])).await;

        assert!(outcome.is_reconciled());
    }

    #[tokio::test]
    async fn test_lease_is_released_after_processing() {
        let post = post_with_media(UserId::new(), vec![]);
        let post_id = *post.id();
        let fx = setup(vec![post], FileStorageStub::new());

        fx.reconciler.handle(&updated(post_id, &[], &[])).await;

        assert!(fx.cache.peek(&cache_keys::post_lock(&post_id)).is_none());
    }

    #[tokio::test]
    async fn test_failed_delete_does_not_abort_cleanup() {
        // Arrange
        let storage = FileStorageStub::new();
        let (a, b) = (storage.seed("a.png"), storage.seed("b.png"));
        storage.fail_delete_of(&a);
        let post = post_with_media(UserId::new(), vec![]);
        let post_id = *post.id();
        let fx = setup(vec![post], storage);

        // Act
        let outcome = fx.reconciler.handle(&updated(post_id, &[a.clone(), b.clone()], &[])).await;

        // Assert : b est supprimé, le cache est rempli malgré l'échec sur a
        match outcome {
            ReconcileOutcome::Incomplete(failures) => {
                assert_eq!(failures.len(), 1);
                assert!(matches!(&failures[0], ReconcileError::StorageCleanupFailed { url, .. } if url == &a));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert_eq!(fx.storage.deleted(), vec![b]);
        assert!(fx.cache.peek(&cache_keys::post(&post_id)).is_some());
        assert!(fx.cache.peek(&cache_keys::post_lock(&post_id)).is_none());
    }

    #[tokio::test]
    async fn test_slow_delete_hits_deadline() {
        let storage = FileStorageStub::new().with_delete_delay(Duration::from_millis(200));
        let a = storage.seed("a.png");
        let post = post_with_media(UserId::new(), vec![]);
        let post_id = *post.id();
        let settings = ReconcilerSettings {
            storage_timeout: Duration::from_millis(20),
            ..ReconcilerSettings::default()
        };
        let fx = setup_with(vec![post], storage, settings);

        let outcome = fx.reconciler.handle(&updated(post_id, &[a.clone()], &[])).await;

        assert!(matches!(outcome, ReconcileOutcome::Incomplete(_)));
        assert!(fx.storage.contains(&a));
    }

    #[tokio::test]
    async fn test_cleanup_never_outlives_the_lease() {
        // Arrange : timeout de suppression plus long que le lease
        let storage = FileStorageStub::new().with_delete_delay(Duration::from_secs(2));
        let (a, b) = (storage.seed("a.png"), storage.seed("b.png"));
        let post = post_with_media(UserId::new(), vec![]);
        let post_id = *post.id();
        let settings = ReconcilerSettings {
            lock_ttl: Duration::from_millis(300),
            storage_timeout: Duration::from_secs(10),
            ..ReconcilerSettings::default()
        };
        let fx = setup_with(vec![post], storage, settings);
        let peer = PostEventReconciler::new(fx.repo.clone(), fx.cache.clone(), fx.storage.clone(), settings);
        let event = updated(post_id, &[a.clone(), b.clone()], &[]);

        // Act : le pair arrive pendant le nettoyage
        let started = std::time::Instant::now();
        let (first, second) = tokio::join!(fx.reconciler.handle(&event), async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            peer.handle(&event).await
        });

        // Assert : lease jamais expiré, le pair a sauté le message
        assert!(started.elapsed() < Duration::from_millis(300));
        match first {
            ReconcileOutcome::Incomplete(failures) => assert_eq!(failures.len(), 2),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(matches!(second, ReconcileOutcome::Skipped(ReconcileError::LockUnavailable { .. })));
        assert!(fx.storage.contains(&a));
        assert!(fx.storage.contains(&b));
    }

    #[tokio::test]
    async fn test_vanished_post_leaves_cache_cold() {
        let post_id = PostId::new();
        let fx = setup(vec![], FileStorageStub::new());
        fx.cache.seed(&cache_keys::post(&post_id), "stale");

        let outcome = fx.reconciler.handle(&updated(post_id, &[], &[])).await;

        assert!(matches!(
            outcome,
            ReconcileOutcome::Incomplete(ref failures) if matches!(failures[0], ReconcileError::RefetchFailed { .. })
        ));
        assert!(fx.cache.peek(&cache_keys::post(&post_id)).is_none());
    }

    #[tokio::test]
    async fn test_delete_cleans_everything_and_rebuilds_lists() {
        // Arrange
        let storage = FileStorageStub::new();
        let (img, pdf) = (storage.seed("a.png"), storage.seed("doc.pdf"));
        let owner = UserId::new();
        let survivor = post_with_media(owner, vec![]);
        let post_id = PostId::new();
        let fx = setup(vec![survivor], storage);
        let page = PageRequest { page: 3, limit: 5 };
        fx.cache.seed(&cache_keys::post(&post_id), "stale");
        fx.cache.seed(&cache_keys::list_page(page), "stale");
        fx.cache.seed(&cache_keys::user_page(&owner, page), "stale");

        // Act
        let outcome = fx
            .reconciler
            .handle(&PostEvent::PostDeleted {
                post_id,
                owner_id: Some(owner),
                media_urls: vec![img.clone()],
                files_urls: vec![pdf.clone()],
                occurred_at: Utc::now(),
            })
            .await;

        // Assert
        assert!(outcome.is_reconciled());
        assert_eq!(fx.storage.deleted(), vec![img, pdf]);
        assert_eq!(fx.cache.keys(), vec![cache_keys::list_page(PageRequest::first())]);
    }

    #[tokio::test]
    async fn test_delete_without_list_rebuild() {
        let fx = setup_with(
            vec![],
            FileStorageStub::new(),
            ReconcilerSettings { rebuild_lists_on_delete: false, ..ReconcilerSettings::default() },
        );
        let page = PageRequest::first();
        fx.cache.seed(&cache_keys::list_page(page), "kept");

        let outcome = fx
            .reconciler
            .handle(&PostEvent::PostDeleted {
                post_id: PostId::new(),
                owner_id: None,
                media_urls: vec![],
                files_urls: vec![],
                occurred_at: Utc::now(),
            })
            .await;

        assert!(outcome.is_reconciled());
        assert_eq!(fx.cache.peek(&cache_keys::list_page(page)).as_deref(), Some("kept"));
    }

    #[tokio::test]
    async fn test_created_rebuilds_first_list_page() {
        // Arrange
        let post = post_with_media(UserId::new(), vec![]);
        let post_id = *post.id();
        let owner = *post.owner_id();
        let fx = setup(vec![post], FileStorageStub::new());
        fx.cache.seed("posts:list_page_2_limit_10", "stale");

        // Act
        let outcome = fx
            .reconciler
            .handle(&PostEvent::PostCreated { post_id, owner_id: Some(owner), occurred_at: Utc::now() })
            .await;

        // Assert
        assert!(outcome.is_reconciled());
        assert!(fx.cache.peek("posts:list_page_2_limit_10").is_none());
        let page = fx.cache.peek(&cache_keys::list_page(PageRequest::first())).unwrap();
        assert!(page.contains(&post_id.to_string()));
        assert!(fx.cache.peek(cache_keys::GLOBAL_UPDATE_LOCK).is_none());
    }

    #[tokio::test]
    async fn test_created_skipped_while_lists_are_rebuilt_elsewhere() {
        let fx = setup(vec![], FileStorageStub::new());
        fx.cache.seed(cache_keys::GLOBAL_UPDATE_LOCK, "other-worker");

        let outcome = fx
            .reconciler
            .handle(&PostEvent::PostCreated { post_id: PostId::new(), owner_id: None, occurred_at: Utc::now() })
            .await;

        assert!(outcome.is_skipped());
        assert_eq!(fx.repo.list_calls.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_undecodable_payloads_are_dropped() {
        let fx = setup(vec![], FileStorageStub::new());

        let garbage = fx.reconciler.handle_payload(b"not json").await;
        let unknown = fx.reconciler.handle_payload(br#"{"type":"PostLiked","data":{}}"#).await;
        let malformed = fx
            .reconciler
            .handle_payload(br#"{"type":"PostUpdated","data":{"post_id":42}}"#)
            .await;

        assert!(matches!(garbage, ReconcileOutcome::Dropped(ReconcileError::DeserializationFailed(_))));
        assert_eq!(unknown, ReconcileOutcome::Dropped(ReconcileError::UnknownEventType("PostLiked".into())));
        assert!(matches!(malformed, ReconcileOutcome::Dropped(ReconcileError::DeserializationFailed(_))));
        assert!(fx.cache.keys().is_empty());
    }

    #[tokio::test]
    async fn test_payload_from_the_wire_is_reconciled() {
        let storage = FileStorageStub::new();
        let a = storage.seed("a.png");
        let post = post_with_media(UserId::new(), vec![]);
        let post_id = *post.id();
        let fx = setup(vec![post], storage);
        let bytes = EventEnvelope::wrap(&updated(post_id, &[a.clone()], &[])).to_vec().unwrap();

        let outcome = fx.reconciler.handle_payload(&bytes).await;

        assert!(outcome.is_reconciled());
        assert!(!fx.storage.contains(&a));
    }
}
