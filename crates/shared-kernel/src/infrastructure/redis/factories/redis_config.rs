// crates/shared-kernel/src/infrastructure/redis/factories/redis_config.rs

use std::env;
use std::time::Duration;
use crate::errors::{AppError, AppResult, ErrorCode};

/// Connexion partagée par le cache-aside et les leases de réconciliation.
#[derive(Debug, Clone, PartialEq)]
pub struct RedisConfig {
    pub url: String,
    pub max_clients: usize,
    /// Borne la connexion initiale et chaque commande
    pub command_timeout: Duration,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            max_clients: 16,
            command_timeout: Duration::from_secs(5),
        }
    }
}

impl RedisConfig {
    /// `POST_REDIS_URL` obligatoire, `POST_REDIS_MAX_CLIENTS` optionnel
    pub fn from_env() -> AppResult<Self> {
        let url = env::var("POST_REDIS_URL")
            .map_err(|_| AppError::new(ErrorCode::InternalError, "POST_REDIS_URL must be set"))?;

        let defaults = Self::default();
        let max_clients = env::var("POST_REDIS_MAX_CLIENTS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(defaults.max_clients);

        Ok(Self { url, max_clients, ..defaults })
    }
}
