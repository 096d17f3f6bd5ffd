// crates/post/src/infrastructure/bootstrap/cache_reconciler.rs

use std::sync::Arc;
use shared_kernel::errors::{AppError, AppResult, ErrorCode};
use shared_kernel::infrastructure::bootstrap::cancel_on_ctrl_c;
use shared_kernel::infrastructure::kafka::KafkaMessageConsumer;
use shared_kernel::infrastructure::postgres::factories::PostgresContext;
use shared_kernel::infrastructure::redis::factories::RedisContext;
use shared_kernel::infrastructure::telemetry::init_tracing;
use tokio_util::sync::CancellationToken;

use crate::application::reconcile_post_event::PostEventReconciler;
use crate::application::workers::CacheReconcilerWorker;
use crate::infrastructure::bootstrap::ReconcilerConfig;
use crate::infrastructure::postgres::repositories::PostgresPostRepository;
use crate::infrastructure::postgres::utils::run_postgres_migrations;
use crate::infrastructure::storage::LocalFileStorage;

/// Démarre le worker de réconciliation et bloque jusqu'au Ctrl-C.
pub async fn run_cache_reconciler(service_name: &str) -> AppResult<()> {
    init_tracing(service_name);
    tracing::info!("🚀 Starting {} cache reconciler...", service_name);

    let config = ReconcilerConfig::from_env();

    // 1. Cache + lease
    let redis = RedisContext::builder()?.build().await?;
    let cache = redis.cache();

    // 2. Store de référence
    let postgres = PostgresContext::builder()?.build().await?;
    run_postgres_migrations(&postgres.pool())
        .await
        .map_err(|e| AppError::new(ErrorCode::InternalError, format!("migrations failed: {e}")))?;
    let repo = Arc::new(PostgresPostRepository::new(postgres.pool()));

    // 3. Object store
    let storage = LocalFileStorage::new(&config.storage_root, &config.storage_public_url);
    storage.ensure_root().await?;

    let reconciler = Arc::new(PostEventReconciler::new(
        repo,
        cache,
        Arc::new(storage),
        config.settings,
    ));

    let consumer = Arc::new(KafkaMessageConsumer::new(&config.kafka));
    let worker = CacheReconcilerWorker::new(consumer, reconciler, config.kafka.topic.clone());

    let shutdown = CancellationToken::new();
    let signal = cancel_on_ctrl_c(shutdown.clone());

    tracing::info!(
        group = %config.kafka.group_id,
        lock_retries = config.settings.lock_retry.max_retries,
        "✅ Cache reconciler active"
    );

    let result = worker.start(shutdown.clone()).await;

    shutdown.cancel();
    let _ = signal.await;
    postgres.close().await;

    result
}
