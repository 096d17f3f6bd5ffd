// crates/shared-kernel/src/infrastructure/redis/factories/redis_context_builder.rs

use crate::errors::AppResult;
use crate::infrastructure::redis::factories::{RedisConfig, RedisContext};

#[derive(Debug, Clone, Default)]
pub struct RedisContextBuilder {
    config: RedisConfig,
}

impl RedisContextBuilder {
    pub fn new() -> AppResult<Self> {
        Ok(Self { config: RedisConfig::from_env()? })
    }

    pub fn with_config(mut self, config: RedisConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.config.url = url.into();
        self
    }

    pub fn with_max_clients(mut self, max: usize) -> Self {
        self.config.max_clients = max;
        self
    }

    pub async fn build(self) -> AppResult<RedisContext> {
        RedisContext::connect(self.config).await
    }
}
