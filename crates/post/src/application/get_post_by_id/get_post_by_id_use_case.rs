// crates/post/src/application/get_post_by_id/get_post_by_id_use_case.rs

use std::sync::Arc;
use std::time::Duration;
use shared_kernel::application::ToDto;
use shared_kernel::domain::entities::EntityOptionExt;
use shared_kernel::domain::repositories::CacheRepository;
use shared_kernel::errors::Result;
use shared_kernel::infrastructure::concurrency::Singleflight;

use crate::application::cache_keys;
use crate::application::get_post_by_id::GetPostByIdCommand;
use crate::application::views::PostView;
use crate::domain::entities::Post;
use crate::domain::repositories::PostRepository;

pub struct GetPostByIdUseCase {
    repo: Arc<dyn PostRepository>,
    cache: Arc<dyn CacheRepository>,
    sf: Singleflight<String, PostView>,
    ttl: Duration,
}

impl GetPostByIdUseCase {
    pub fn new(repo: Arc<dyn PostRepository>, cache: Arc<dyn CacheRepository>, ttl: Duration) -> Self {
        Self {
            repo,
            cache,
            sf: Singleflight::new(),
            ttl,
        }
    }

    pub async fn execute(&self, cmd: GetPostByIdCommand) -> Result<PostView> {
        let cache_key = cache_keys::post(&cmd.post_id);

        // 1. TENTATIVE CACHE (Fast Path)
        // Miss, erreur Redis et JSON corrompu sont traités pareil : on lit le store
        if let Ok(Some(cached_json)) = self.cache.get(&cache_key).await {
            if let Ok(view) = serde_json::from_str::<PostView>(&cached_json) {
                return Ok(view);
            }
            tracing::debug!(key = %cache_key, "Corrupted cache entry, refreshing");
        }

        // 2. PROTECTION SINGLEFLIGHT
        let sf_key = cache_key.clone();
        self.sf
            .execute(sf_key, || {
                let repo = Arc::clone(&self.repo);
                let cache = Arc::clone(&self.cache);
                let post_id = cmd.post_id;
                let key = cache_key.clone();
                let ttl = self.ttl;

                async move {
                    let view = repo
                        .fetch(&post_id)
                        .await?
                        .ok_or_not_found(post_id)
                        .map(|post: Post| post.to_dto())?;

                    if let Ok(json) = serde_json::to_string(&view) {
                        if let Err(e) = cache.set(&key, &json, Some(ttl)).await {
                            tracing::warn!(key = %key, error = %e, "⚠️ Cache fill failed");
                        }
                    }

                    Ok(view)
                }
            })
            .await
    }
}
