// crates/shared-kernel/src/application/ports/message_producer.rs

use crate::domain::events::EventEnvelope;
use crate::errors::AppResult;
use async_trait::async_trait;
use std::time::Duration;

#[async_trait]
pub trait MessageProducer: Send + Sync {
    /// Publie une enveloppe vers le topic configuré, clé = `aggregate_id`.
    async fn publish(&self, event: &EventEnvelope) -> AppResult<()>;

    /// Publie un batch d'enveloppes.
    async fn publish_batch(&self, events: &[EventEnvelope]) -> AppResult<()>;

    /// Vide les buffers internes avant l'arrêt du process.
    async fn flush(&self, timeout: Duration) -> AppResult<()>;
}
