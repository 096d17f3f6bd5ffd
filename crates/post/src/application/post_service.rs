// crates/post/src/application/post_service.rs

use std::env;
use std::sync::Arc;
use std::time::Duration;
use shared_kernel::application::ports::MessageProducer;
use shared_kernel::clock::{Clock, SystemClock};
use shared_kernel::domain::repositories::CacheRepository;
use shared_kernel::domain::value_objects::{PostId, UserId};
use shared_kernel::errors::Result;

use crate::application::create_post::{CreatePostCommand, CreatePostUseCase};
use crate::application::delete_post::{DeletePostCommand, DeletePostUseCase};
use crate::application::get_post_by_id::{GetPostByIdCommand, GetPostByIdUseCase};
use crate::application::list_posts::{ListPostsCommand, ListPostsUseCase};
use crate::application::update_post::{UpdatePostCommand, UpdatePostUseCase};
use crate::application::upload_attachments::AttachmentUploader;
use crate::application::views::{PaginatedPostsView, PostView};
use crate::domain::attachments::AttachmentSource;
use crate::domain::repositories::{FileStorage, PostRepository};

#[derive(Debug, Clone, Copy)]
pub struct PostServiceConfig {
    /// TTL des entrées cache-aside
    pub cache_ttl: Duration,
    /// Deadline de chaque upload
    pub upload_timeout: Duration,
    /// Attente maximale du flush producteur à l'arrêt
    pub flush_timeout: Duration,
}

impl Default for PostServiceConfig {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(600),
            upload_timeout: Duration::from_millis(30_000),
            flush_timeout: Duration::from_secs(5),
        }
    }
}

impl PostServiceConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            cache_ttl: env::var("POST_CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.cache_ttl),
            upload_timeout: env::var("POST_UPLOAD_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.upload_timeout),
            flush_timeout: defaults.flush_timeout,
        }
    }
}

/// Façade exposée à la couche transport : mutations + lectures cache-aside.
pub struct PostService {
    create: CreatePostUseCase,
    update: UpdatePostUseCase,
    delete: DeletePostUseCase,
    get_by_id: GetPostByIdUseCase,
    list: ListPostsUseCase,
    producer: Arc<dyn MessageProducer>,
    config: PostServiceConfig,
}

impl PostService {
    pub fn new(
        repo: Arc<dyn PostRepository>,
        cache: Arc<dyn CacheRepository>,
        storage: Arc<dyn FileStorage>,
        producer: Arc<dyn MessageProducer>,
        config: PostServiceConfig,
    ) -> Self {
        Self::with_clock(repo, cache, storage, producer, config, Arc::new(SystemClock))
    }

    pub fn with_clock(
        repo: Arc<dyn PostRepository>,
        cache: Arc<dyn CacheRepository>,
        storage: Arc<dyn FileStorage>,
        producer: Arc<dyn MessageProducer>,
        config: PostServiceConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let uploader = AttachmentUploader::new(storage, config.upload_timeout);

        Self {
            create: CreatePostUseCase::new(repo.clone(), uploader.clone(), producer.clone(), clock.clone()),
            update: UpdatePostUseCase::new(repo.clone(), cache.clone(), uploader, producer.clone(), clock.clone()),
            delete: DeletePostUseCase::new(repo.clone(), cache.clone(), producer.clone(), clock),
            get_by_id: GetPostByIdUseCase::new(repo.clone(), cache.clone(), config.cache_ttl),
            list: ListPostsUseCase::new(repo, cache, config.cache_ttl),
            producer,
            config,
        }
    }

    pub async fn create(
        &self,
        owner_id: UserId,
        content: impl Into<String>,
        media: Vec<Arc<dyn AttachmentSource>>,
        files: Vec<Arc<dyn AttachmentSource>>,
    ) -> Result<PostId> {
        self.create
            .execute(CreatePostCommand { owner_id, content: content.into(), media, files })
            .await
    }

    pub async fn update(
        &self,
        post_id: PostId,
        owner_id: UserId,
        content: impl Into<String>,
        media: Vec<Arc<dyn AttachmentSource>>,
        files: Vec<Arc<dyn AttachmentSource>>,
    ) -> Result<()> {
        self.update
            .execute(UpdatePostCommand { post_id, owner_id, content: content.into(), media, files })
            .await
    }

    pub async fn delete(&self, post_id: PostId, owner_id: UserId) -> Result<()> {
        self.delete.execute(DeletePostCommand { post_id, owner_id }).await
    }

    pub async fn get_by_id(&self, post_id: PostId) -> Result<PostView> {
        self.get_by_id.execute(GetPostByIdCommand { post_id }).await
    }

    /// `page` / `limit` bruts : clampés à `>= 1`, limite par défaut si invalide
    pub async fn list(&self, page: i64, limit: i64) -> Result<PaginatedPostsView> {
        self.list.execute(ListPostsCommand::all(page, limit)).await
    }

    pub async fn list_by_owner(&self, owner_id: UserId, page: i64, limit: i64) -> Result<PaginatedPostsView> {
        self.list.execute(ListPostsCommand::by_owner(owner_id, page, limit)).await
    }

    /// Vide les buffers du producteur avant l'arrêt du process
    pub async fn shutdown(&self) {
        if let Err(e) = self.producer.flush(self.config.flush_timeout).await {
            tracing::warn!(error = %e, "⚠️ Producer flush failed on shutdown");
        }
    }
}
