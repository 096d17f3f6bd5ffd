// crates/post/src/application/update_post/update_post_use_case.rs

use std::sync::Arc;
use shared_kernel::application::ports::MessageProducer;
use shared_kernel::clock::Clock;
use shared_kernel::domain::entities::EntityOptionExt;
use shared_kernel::domain::repositories::CacheRepository;
use shared_kernel::errors::Result;

use crate::application::cache_keys;
use crate::application::event_publisher::publish_best_effort;
use crate::application::update_post::UpdatePostCommand;
use crate::application::upload_attachments::AttachmentUploader;
use crate::domain::entities::Post;
use crate::domain::events::PostEvent;
use crate::domain::repositories::PostRepository;

pub struct UpdatePostUseCase {
    repo: Arc<dyn PostRepository>,
    cache: Arc<dyn CacheRepository>,
    uploader: AttachmentUploader,
    producer: Arc<dyn MessageProducer>,
    clock: Arc<dyn Clock>,
}

impl UpdatePostUseCase {
    pub fn new(
        repo: Arc<dyn PostRepository>,
        cache: Arc<dyn CacheRepository>,
        uploader: AttachmentUploader,
        producer: Arc<dyn MessageProducer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { repo, cache, uploader, producer, clock }
    }

    pub async fn execute(&self, cmd: UpdatePostCommand) -> Result<()> {
        // 1. Chargement + contrôle d'auteur, avant tout upload
        let mut post = self
            .repo
            .fetch(&cmd.post_id)
            .await?
            .ok_or_not_found(cmd.post_id)?;
        post.ensure_owned_by(&cmd.owner_id)?;

        // 2. Instantané des URLs avant écriture
        let media_old_urls = post.media_urls();
        let files_old_urls = post.files_urls();

        // 3. Uploads des nouvelles pièces jointes (remplacement complet)
        let (media, files) = self.uploader.upload_groups(&cmd.media, &cmd.files).await?;

        // 4. Mutation + persistance
        let now = self.clock.now();
        post.revise(cmd.content, media, files, now);
        self.repo.update(&post).await?;
        tracing::info!(post_id = %cmd.post_id, "✏️ Post updated");

        // 5. Invalidation optimiste, le réconciliateur fera le remplissage
        self.invalidate(&post).await;

        // 6. Événement avec les deux instantanés
        publish_best_effort(
            &self.producer,
            &PostEvent::PostUpdated {
                post_id: cmd.post_id,
                owner_id: Some(cmd.owner_id),
                media_new_urls: post.media_urls(),
                media_old_urls,
                files_new_urls: post.files_urls(),
                files_old_urls,
                occurred_at: now,
            },
        )
        .await;

        Ok(())
    }

    async fn invalidate(&self, post: &Post) {
        use shared_kernel::domain::entities::Entity;

        let post_key = cache_keys::post(post.id());
        if let Err(e) = self.cache.delete(&post_key).await {
            tracing::warn!(key = %post_key, error = %e, "⚠️ Cache invalidation failed");
        }

        for pattern in [
            cache_keys::LIST_PAGES_PATTERN.to_string(),
            cache_keys::user_pages_pattern(post.owner_id()),
        ] {
            if let Err(e) = self.cache.invalidate_pattern(&pattern).await {
                tracing::warn!(pattern = %pattern, error = %e, "⚠️ List cache invalidation failed");
            }
        }
    }
}
