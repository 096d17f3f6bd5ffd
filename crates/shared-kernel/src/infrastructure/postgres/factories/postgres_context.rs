// crates/shared-kernel/src/infrastructure/postgres/factories/postgres_context.rs

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::infrastructure::postgres::factories::{PostgresConfig, PostgresContextBuilder};

pub struct PostgresContext {
    pool: PgPool,
    config: PostgresConfig,
}

impl PostgresContext {
    /// Lit `POST_DB_URL` et les réglages du pool
    pub fn builder() -> AppResult<PostgresContextBuilder> {
        PostgresContextBuilder::new()
    }

    pub fn builder_raw() -> PostgresContextBuilder {
        PostgresContextBuilder::default()
    }

    /// Handle cloné (le pool est partagé)
    pub fn pool(&self) -> PgPool {
        self.pool.clone()
    }

    pub fn config(&self) -> &PostgresConfig {
        &self.config
    }

    /// Attend la restitution des connexions en cours
    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub(crate) async fn connect(config: PostgresConfig) -> AppResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect(&config.url)
            .await
            .map_err(|e| AppError::new(ErrorCode::StoreFailure, format!("Postgres connection failed: {e}")))?;

        tracing::info!(
            max = config.max_connections,
            min = config.min_connections,
            "🐘 Postgres pool ready"
        );

        Ok(Self { pool, config })
    }
}
