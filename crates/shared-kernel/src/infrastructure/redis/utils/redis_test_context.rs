// crates/shared-kernel/src/infrastructure/redis/utils/redis_test_context.rs

use std::sync::Arc;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::redis::{Redis as RedisImage, REDIS_PORT};
use crate::infrastructure::redis::factories::RedisContext;
use crate::infrastructure::redis::repositories::RedisCacheRepository;

/// Redis jetable : le container vit aussi longtemps que le contexte.
pub struct RedisTestContext {
    context: RedisContext,
    _container: ContainerAsync<RedisImage>,
}

pub struct RedisTestContextBuilder {
    image_tag: String,
    max_clients: usize,
}

impl Default for RedisTestContextBuilder {
    fn default() -> Self {
        Self { image_tag: "7.2-alpine".to_string(), max_clients: 2 }
    }
}

impl RedisTestContextBuilder {
    pub fn with_image_tag(mut self, tag: &str) -> Self {
        self.image_tag = tag.to_string();
        self
    }

    pub fn with_max_clients(mut self, max: usize) -> Self {
        self.max_clients = max;
        self
    }

    pub async fn build(self) -> RedisTestContext {
        let container = RedisImage::default()
            .with_tag(&self.image_tag)
            .start()
            .await
            .expect("redis container did not start");

        let host = container.get_host().await.expect("container host");
        let port = container.get_host_port_ipv4(REDIS_PORT).await.expect("container port");

        // Contexte de production, URL injectée sans lire l'ENV
        let context = RedisContext::builder_raw()
            .with_url(format!("redis://{host}:{port}"))
            .with_max_clients(self.max_clients)
            .build()
            .await
            .expect("redis context");

        RedisTestContext { context, _container: container }
    }
}

impl RedisTestContext {
    pub fn builder() -> RedisTestContextBuilder {
        RedisTestContextBuilder::default()
    }

    pub fn repository(&self) -> Arc<RedisCacheRepository> {
        self.context.repository()
    }
}
