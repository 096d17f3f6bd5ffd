// crates/shared-kernel/src/infrastructure/postgres/factories/postgres_context_builder.rs

use std::time::Duration;
use crate::errors::AppResult;
use crate::infrastructure::postgres::factories::{PostgresConfig, PostgresContext};

#[derive(Debug, Clone, Default)]
pub struct PostgresContextBuilder {
    config: PostgresConfig,
}

impl PostgresContextBuilder {
    pub fn new() -> AppResult<Self> {
        Ok(Self { config: PostgresConfig::from_env()? })
    }

    pub fn with_config(mut self, config: PostgresConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.config.url = url.into();
        self
    }

    /// `min` est ramené à `max` s'il le dépasse
    pub fn with_pool_size(mut self, min: u32, max: u32) -> Self {
        self.config.max_connections = max.max(1);
        self.config.min_connections = min.min(self.config.max_connections);
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    pub async fn build(self) -> AppResult<PostgresContext> {
        PostgresContext::connect(self.config).await
    }
}
