// crates/post/tests/application/service_it_for_cache_aside.rs

use post::application::cache_keys;
use shared_kernel::domain::value_objects::UserId;
use shared_kernel::infrastructure::pagination::{PageRequest, DEFAULT_PAGE_LIMIT};

use crate::fixture::Harness;

#[tokio::test]
async fn test_second_read_is_served_from_cache() {
    let h = Harness::new();
    let post_id = h.service.create(UserId::new(), "cached", vec![], vec![]).await.unwrap();
    let before = h.repo.fetch_calls();

    let first = h.service.get_by_id(post_id).await.unwrap();
    let second = h.service.get_by_id(post_id).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(h.repo.fetch_calls() - before, 1);
    assert!(h.cache.peek(&cache_keys::post(&post_id)).is_some());
}

#[tokio::test]
async fn test_update_invalidates_before_reconciliation() {
    let h = Harness::new();
    let owner = UserId::new();
    let post_id = h.service.create(owner, "v1", vec![], vec![]).await.unwrap();
    h.service.get_by_id(post_id).await.unwrap();

    h.service.update(post_id, owner, "v2", vec![], vec![]).await.unwrap();

    // Aucune lecture périmée même si le réconciliateur n'est pas encore passé
    assert!(h.cache.peek(&cache_keys::post(&post_id)).is_none());
    assert_eq!(h.service.get_by_id(post_id).await.unwrap().content, "v2");
}

#[tokio::test]
async fn test_list_pages_and_owner_filter() {
    let h = Harness::new();
    let alice = UserId::new();
    let bob = UserId::new();
    for content in ["a1", "a2"] {
        h.service.create(alice, content, vec![], vec![]).await.unwrap();
    }
    h.service.create(bob, "b1", vec![], vec![]).await.unwrap();

    let page = h.service.list(1, 2).await.unwrap();
    let alice_posts = h.service.list_by_owner(alice, 1, 10).await.unwrap();

    assert_eq!(page.total, 3);
    assert_eq!(page.items.len(), 2);
    assert!(page.has_next);
    assert_eq!(page.items[0].content, "b1");
    assert_eq!(alice_posts.total, 2);
    assert!(alice_posts.items.iter().all(|p| p.owner_id == alice));
    assert!(h.cache.peek(&cache_keys::list_page(PageRequest::normalize(1, 2))).is_some());
}

#[tokio::test]
async fn test_created_post_refreshes_first_list_page() {
    let h = Harness::new();
    h.service.create(UserId::new(), "first", vec![], vec![]).await.unwrap();
    let stale = h.service.list(1, i64::from(DEFAULT_PAGE_LIMIT)).await.unwrap();
    assert_eq!(stale.total, 1);

    h.service.create(UserId::new(), "second", vec![], vec![]).await.unwrap();
    h.drain().await;

    let fresh = h.service.list(1, i64::from(DEFAULT_PAGE_LIMIT)).await.unwrap();
    assert_eq!(fresh.total, 2);
    assert_eq!(fresh.items[0].content, "second");
}

#[tokio::test]
async fn test_cache_outage_falls_back_to_store() {
    let h = Harness::new();
    let post_id = h.service.create(UserId::new(), "resilient", vec![], vec![]).await.unwrap();
    h.cache.set_failing(true);

    let view = h.service.get_by_id(post_id).await.unwrap();

    assert_eq!(view.content, "resilient");
}
