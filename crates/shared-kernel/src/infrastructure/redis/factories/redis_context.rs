// crates/shared-kernel/src/infrastructure/redis/factories/redis_context.rs

use std::sync::Arc;
use crate::domain::repositories::CacheRepository;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::infrastructure::redis::factories::{RedisConfig, RedisContextBuilder};
use crate::infrastructure::redis::repositories::RedisCacheRepository;

/// Pool Redis prêt à l'emploi et la configuration qui l'a produit.
pub struct RedisContext {
    repository: Arc<RedisCacheRepository>,
    config: RedisConfig,
}

impl RedisContext {
    /// Lit `POST_REDIS_URL` / `POST_REDIS_MAX_CLIENTS`
    pub fn builder() -> AppResult<RedisContextBuilder> {
        RedisContextBuilder::new()
    }

    /// Sans lecture d'ENV (tests)
    pub fn builder_raw() -> RedisContextBuilder {
        RedisContextBuilder::default()
    }

    pub fn repository(&self) -> Arc<RedisCacheRepository> {
        self.repository.clone()
    }

    /// Même pool, vu à travers le port
    pub fn cache(&self) -> Arc<dyn CacheRepository> {
        self.repository.clone()
    }

    pub fn config(&self) -> &RedisConfig {
        &self.config
    }

    pub(crate) async fn connect(config: RedisConfig) -> AppResult<Self> {
        let repository = RedisCacheRepository::connect(&config).await.map_err(|e| {
            AppError::new(
                ErrorCode::InfrastructureFailure,
                format!("Redis unreachable at {}: {}", config.url, e.message),
            )
        })?;

        Ok(Self { repository: Arc::new(repository), config })
    }
}
