#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use chrono::Utc;
    use shared_kernel::application::ports::MessageProducerStub;
    use shared_kernel::clock::SystemClock;
    use shared_kernel::domain::entities::Entity;
    use shared_kernel::domain::repositories::CacheRepositoryStub;
    use shared_kernel::domain::value_objects::{PostId, Url, UserId};
    use shared_kernel::errors::DomainError;

    use crate::application::cache_keys;
    use crate::application::delete_post::{DeletePostCommand, DeletePostUseCase};
    use crate::domain::entities::Post;
    use crate::domain::events::PostEvent;
    use crate::domain::repositories::PostRepositoryStub;
    use crate::domain::value_objects::{AttachmentKind, FileGroup};

    fn url(name: &str) -> Url {
        Url::new_unchecked(format!("https://objects.test/posts/{name}"))
    }

    fn setup(post: Post) -> (DeletePostUseCase, Arc<PostRepositoryStub>, Arc<CacheRepositoryStub>, Arc<MessageProducerStub>) {
        let repo = Arc::new(PostRepositoryStub::with_posts([post]));
        let cache = Arc::new(CacheRepositoryStub::new());
        let producer = Arc::new(MessageProducerStub::new());
        let use_case = DeletePostUseCase::new(
            repo.clone(),
            cache.clone(),
            producer.clone(),
            Arc::new(SystemClock),
        );
        (use_case, repo, cache, producer)
    }

    fn post_with_attachments(owner: UserId) -> Post {
        Post::new(
            owner,
            "bye",
            vec![FileGroup::new(AttachmentKind::Video, vec![url("clip.mp4")])],
            vec![FileGroup::new(AttachmentKind::File, vec![url("doc.pdf")])],
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_delete_post_publishes_orphaned_urls() {
        // Arrange
        let owner = UserId::new();
        let post = post_with_attachments(owner);
        let post_id = *post.id();
        let (use_case, repo, cache, producer) = setup(post);
        cache.seed(&cache_keys::post(&post_id), "{}");

        // Act
        use_case.execute(DeletePostCommand { post_id, owner_id: owner }).await.unwrap();

        // Assert
        assert!(repo.get(&post_id).is_none());
        assert!(cache.peek(&cache_keys::post(&post_id)).is_none());

        let event = PostEvent::try_from(&producer.published()[0]).unwrap();
        assert_eq!(
            event,
            PostEvent::PostDeleted {
                post_id,
                owner_id: Some(owner),
                media_urls: vec![url("clip.mp4")],
                files_urls: vec![url("doc.pdf")],
                occurred_at: event_time(&event),
            }
        );
    }

    fn event_time(event: &PostEvent) -> chrono::DateTime<Utc> {
        match event {
            PostEvent::PostCreated { occurred_at, .. }
            | PostEvent::PostUpdated { occurred_at, .. }
            | PostEvent::PostDeleted { occurred_at, .. } => *occurred_at,
        }
    }

    #[tokio::test]
    async fn test_delete_by_other_user_is_denied() {
        let post = post_with_attachments(UserId::new());
        let post_id = *post.id();
        let (use_case, repo, _, producer) = setup(post);

        let result = use_case.execute(DeletePostCommand { post_id, owner_id: UserId::new() }).await;

        assert!(matches!(result, Err(DomainError::PermissionDenied { .. })));
        assert!(repo.get(&post_id).is_some());
        assert_eq!(repo.write_calls(), 0);
        assert!(producer.published().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_post_returns_not_found() {
        let (use_case, _, _, producer) = setup(post_with_attachments(UserId::new()));

        let result = use_case
            .execute(DeletePostCommand { post_id: PostId::new(), owner_id: UserId::new() })
            .await;

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
        assert!(producer.published().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_is_surfaced() {
        let owner = UserId::new();
        let post = post_with_attachments(owner);
        let post_id = *post.id();
        let (use_case, repo, _, producer) = setup(post);
        *repo.error_to_return.lock().unwrap() = Some(DomainError::StoreFailure("db down".into()));

        let result = use_case.execute(DeletePostCommand { post_id, owner_id: owner }).await;

        assert!(matches!(result, Err(DomainError::StoreFailure(_))));
        assert!(producer.published().is_empty());
    }
}
