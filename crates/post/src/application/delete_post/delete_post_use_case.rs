// crates/post/src/application/delete_post/delete_post_use_case.rs

use std::sync::Arc;
use shared_kernel::application::ports::MessageProducer;
use shared_kernel::clock::Clock;
use shared_kernel::domain::entities::EntityOptionExt;
use shared_kernel::domain::repositories::CacheRepository;
use shared_kernel::errors::Result;

use crate::application::cache_keys;
use crate::application::delete_post::DeletePostCommand;
use crate::application::event_publisher::publish_best_effort;
use crate::domain::entities::Post;
use crate::domain::events::PostEvent;
use crate::domain::repositories::PostRepository;

pub struct DeletePostUseCase {
    repo: Arc<dyn PostRepository>,
    cache: Arc<dyn CacheRepository>,
    producer: Arc<dyn MessageProducer>,
    clock: Arc<dyn Clock>,
}

impl DeletePostUseCase {
    pub fn new(
        repo: Arc<dyn PostRepository>,
        cache: Arc<dyn CacheRepository>,
        producer: Arc<dyn MessageProducer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { repo, cache, producer, clock }
    }

    pub async fn execute(&self, cmd: DeletePostCommand) -> Result<()> {
        // 1. Chargement + contrôle d'auteur
        let post: Post = self
            .repo
            .fetch(&cmd.post_id)
            .await?
            .ok_or_not_found(cmd.post_id)?;
        post.ensure_owned_by(&cmd.owner_id)?;

        // 2. Suppression dans le store de référence
        self.repo.delete(&cmd.post_id).await?;
        tracing::info!(post_id = %cmd.post_id, "🗑️ Post deleted");

        // 3. Invalidation best-effort
        let key = cache_keys::post(&cmd.post_id);
        if let Err(e) = self.cache.delete(&key).await {
            tracing::warn!(key = %key, error = %e, "⚠️ Cache invalidation failed");
        }

        // 4. Les pièces jointes sont désormais orphelines : le réconciliateur les supprime
        publish_best_effort(
            &self.producer,
            &PostEvent::PostDeleted {
                post_id: cmd.post_id,
                owner_id: Some(*post.owner_id()),
                media_urls: post.media_urls(),
                files_urls: post.files_urls(),
                occurred_at: self.clock.now(),
            },
        )
        .await;

        Ok(())
    }
}
