// crates/post/src/application/list_posts/list_posts_use_case.rs

use std::sync::Arc;
use std::time::Duration;
use shared_kernel::application::ToDto;
use shared_kernel::domain::repositories::CacheRepository;
use shared_kernel::errors::Result;
use shared_kernel::infrastructure::concurrency::Singleflight;
use shared_kernel::infrastructure::pagination::{PageRequest, PageResponse};

use crate::application::cache_keys;
use crate::application::list_posts::ListPostsCommand;
use crate::application::views::PaginatedPostsView;
use crate::domain::repositories::{PostFilter, PostRepository};

pub struct ListPostsUseCase {
    repo: Arc<dyn PostRepository>,
    cache: Arc<dyn CacheRepository>,
    sf: Singleflight<String, PaginatedPostsView>,
    ttl: Duration,
}

impl ListPostsUseCase {
    pub fn new(repo: Arc<dyn PostRepository>, cache: Arc<dyn CacheRepository>, ttl: Duration) -> Self {
        Self {
            repo,
            cache,
            sf: Singleflight::new(),
            ttl,
        }
    }

    pub async fn execute(&self, cmd: ListPostsCommand) -> Result<PaginatedPostsView> {
        let cache_key = match &cmd.owner_id {
            Some(owner_id) => cache_keys::user_page(owner_id, cmd.page),
            None => cache_keys::list_page(cmd.page),
        };

        // 1. Fast path
        if let Ok(Some(cached_json)) = self.cache.get(&cache_key).await {
            if let Ok(view) = serde_json::from_str::<PaginatedPostsView>(&cached_json) {
                return Ok(view);
            }
        }

        // 2. Singleflight sur la clé de page
        self.sf
            .execute(cache_key.clone(), || {
                let repo = Arc::clone(&self.repo);
                let cache = Arc::clone(&self.cache);
                let filter = PostFilter { owner_id: cmd.owner_id };
                let page = cmd.page;
                let ttl = self.ttl;

                async move {
                    let view = load_page(repo.as_ref(), &filter, page).await?;

                    if let Ok(json) = serde_json::to_string(&view) {
                        if let Err(e) = cache.set(&cache_key, &json, Some(ttl)).await {
                            tracing::warn!(key = %cache_key, error = %e, "⚠️ Cache fill failed");
                        }
                    }

                    Ok(view)
                }
            })
            .await
    }
}

/// Lecture d'une page depuis le store de référence, projetée en vue
pub(crate) async fn load_page(
    repo: &dyn PostRepository,
    filter: &PostFilter,
    page: PageRequest,
) -> Result<PaginatedPostsView> {
    let (posts, total) = repo.list(filter, page).await?;
    Ok(PageResponse::new(posts, total, page).map(|post| post.to_dto()))
}
