// crates/shared-kernel/src/application/ports/message_consumer.rs

use async_trait::async_trait;
use futures_util::future::BoxFuture;
use tokio_util::sync::CancellationToken;
use crate::errors::AppResult;

/// Reçoit le payload brut : le décodage (et son échec) appartient au handler.
pub type MessageHandler = Box<dyn Fn(Vec<u8>) -> BoxFuture<'static, AppResult<()>> + Send + Sync>;

#[async_trait]
pub trait MessageConsumer: Send + Sync {
    /// Boucle de consommation d'un worker unique.
    /// Retourne quand `shutdown` est annulé, après avoir terminé le message en cours.
    async fn consume(
        &self,
        topics: &[&str],
        handler: MessageHandler,
        shutdown: CancellationToken,
    ) -> AppResult<()>;
}
