// crates/shared-kernel/src/infrastructure/redis/repositories/redis_cache_repository.rs

use async_trait::async_trait;
use fred::clients::Pool;
use fred::prelude::*;
use fred::types::scan::ScanType;
use fred::types::{Builder, Expiration, SetOptions};
use std::time::Duration;

use crate::domain::repositories::CacheRepository;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::infrastructure::redis::factories::RedisConfig;

/// Supprime la clé seulement si elle porte encore le jeton du détenteur.
const COMPARE_AND_DELETE: &str = r#"
if redis.call("GET", KEYS[1]) == ARGV[1] then
    return redis.call("DEL", KEYS[1])
else
    return 0
end
"#;

pub struct RedisCacheRepository {
    pool: Pool,
}

impl RedisCacheRepository {
    pub async fn connect(config: &RedisConfig) -> AppResult<Self> {
        let client_config = Config::from_url(&config.url).map_err(Self::map_err)?;
        let size = config.max_clients.max(1);
        let timeout = config.command_timeout;

        let pool = Builder::from_config(client_config)
            .with_connection_config(|cfg| {
                cfg.connection_timeout = timeout;
                cfg.internal_command_timeout = timeout;
                cfg.max_command_attempts = 5;
            })
            .set_policy(ReconnectPolicy::new_exponential(0, 100, 1000, 2))
            .build_pool(size)
            .map_err(Self::map_err)?;

        pool.init().await.map_err(Self::map_err)?;

        // On attend que TOUS les clients du pool soient connectés
        pool.wait_for_connect().await.map_err(Self::map_err)?;

        tracing::info!(clients = size, "🔌 Redis pool connected");
        Ok(Self { pool })
    }

    fn map_err(e: Error) -> AppError {
        AppError::new(ErrorCode::InfrastructureFailure, e.to_string())
    }

    fn map_expiration(ttl: Option<Duration>) -> Option<Expiration> {
        ttl.map(|d| {
            if d.subsec_millis() != 0 || d < Duration::from_secs(1) {
                Expiration::PX(i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
            } else {
                Expiration::EX(i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
            }
        })
    }
}

#[async_trait]
impl CacheRepository for RedisCacheRepository {
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> AppResult<()> {
        self.pool
            .set::<(), _, _>(key, value, Self::map_expiration(ttl), None, false)
            .await
            .map_err(Self::map_err)
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.pool.get(key).await.map_err(Self::map_err)
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.pool.del::<i64, _>(key).await.map_err(Self::map_err)?;
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let count: i64 = self.pool.exists(key).await.map_err(Self::map_err)?;
        Ok(count > 0)
    }

    async fn invalidate_pattern(&self, pattern: &str) -> AppResult<()> {
        let mut current_cursor = "0".to_string();
        let mut removed = 0usize;

        loop {
            let (next_cursor, keys): (String, Vec<String>) = self
                .pool
                .scan_page::<(String, Vec<String>), String, String>(
                    current_cursor,
                    pattern.to_string(),
                    Some(250u32),
                    None::<ScanType>,
                )
                .await
                .map_err(|e| {
                    AppError::new(ErrorCode::InfrastructureFailure, format!("Redis Scan Error: {}", e))
                })?;

            if !keys.is_empty() {
                removed += keys.len();
                self.pool.del::<i64, _>(keys).await.map_err(Self::map_err)?;
            }

            if next_cursor == "0" {
                break;
            }
            current_cursor = next_cursor;
        }

        tracing::debug!(pattern, removed, "🧹 Pattern invalidated");
        Ok(())
    }

    async fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool> {
        // SET key value PX ttl NX : "OK" si posé, nil sinon
        let reply: Option<String> = self
            .pool
            .set(
                key,
                value,
                Self::map_expiration(Some(ttl)),
                Some(SetOptions::NX),
                false,
            )
            .await
            .map_err(Self::map_err)?;

        Ok(reply.is_some())
    }

    async fn delete_if_equals(&self, key: &str, expected: &str) -> AppResult<bool> {
        let deleted: i64 = self
            .pool
            .eval(COMPARE_AND_DELETE, vec![key.to_string()], vec![expected.to_string()])
            .await
            .map_err(Self::map_err)?;

        Ok(deleted > 0)
    }
}
