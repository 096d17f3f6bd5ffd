// crates/post/src/application/workers/cache_reconciler_worker.rs

use std::sync::{Arc, Mutex};
use futures::future::BoxFuture;
use shared_kernel::application::ports::{MessageConsumer, MessageHandler};
use shared_kernel::errors::AppResult;
use tokio_util::sync::CancellationToken;

use crate::application::reconcile_post_event::PostEventReconciler;

/// Worker unique par membre du consumer group : un message à la fois,
/// l'annulation attend la fin du message en cours.
pub struct CacheReconcilerWorker {
    consumer: Arc<dyn MessageConsumer>,
    reconciler: Arc<PostEventReconciler>,
    topic: String,
    shutdown: Mutex<Option<CancellationToken>>,
}

impl CacheReconcilerWorker {
    pub fn new(
        consumer: Arc<dyn MessageConsumer>,
        reconciler: Arc<PostEventReconciler>,
        topic: impl Into<String>,
    ) -> Self {
        Self {
            consumer,
            reconciler,
            topic: topic.into(),
            shutdown: Mutex::new(None),
        }
    }

    /// Bloque jusqu'à l'annulation de `cancel` ou un appel à `stop`.
    pub async fn start(&self, cancel: CancellationToken) -> AppResult<()> {
        let token = cancel.child_token();
        if let Ok(mut slot) = self.shutdown.lock() {
            *slot = Some(token.clone());
        }

        tracing::info!(topic = %self.topic, "🚀 Cache reconciler starting");

        let reconciler = Arc::clone(&self.reconciler);
        let handler: MessageHandler = Box::new(move |payload: Vec<u8>| -> BoxFuture<'static, AppResult<()>> {
            let reconciler = Arc::clone(&reconciler);

            Box::pin(async move {
                // Les échecs sont absorbés par le réconciliateur : le message est acquitté
                reconciler.handle_payload(&payload).await;
                Ok(())
            })
        });

        let result = self.consumer.consume(&[self.topic.as_str()], handler, token).await;
        tracing::info!(topic = %self.topic, "🛑 Cache reconciler stopped");
        result
    }

    /// Demande l'arrêt ; sans effet si le worker n'a pas démarré.
    pub fn stop(&self) {
        if let Ok(slot) = self.shutdown.lock() {
            if let Some(token) = slot.as_ref() {
                token.cancel();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use chrono::Utc;
    use shared_kernel::application::ports::MessageConsumerStub;
    use shared_kernel::domain::events::EventEnvelope;
    use shared_kernel::domain::repositories::CacheRepositoryStub;
    use shared_kernel::domain::value_objects::PostId;

    use crate::application::reconcile_post_event::ReconcilerSettings;
    use crate::domain::events::PostEvent;
    use crate::domain::repositories::{FileStorageStub, PostRepositoryStub};

    fn worker(consumer: Arc<MessageConsumerStub>, storage: Arc<FileStorageStub>) -> Arc<CacheReconcilerWorker> {
        let reconciler = PostEventReconciler::new(
            Arc::new(PostRepositoryStub::new()),
            Arc::new(CacheRepositoryStub::new()),
            storage,
            ReconcilerSettings::default(),
        );
        Arc::new(CacheReconcilerWorker::new(consumer, Arc::new(reconciler), "post.events"))
    }

    #[tokio::test]
    async fn test_worker_drains_queue_and_stops() {
        // Arrange
        let storage = Arc::new(FileStorageStub::new());
        let orphan = storage.seed("a.png");
        let deleted = PostEvent::PostDeleted {
            post_id: PostId::new(),
            owner_id: None,
            media_urls: vec![orphan.clone()],
            files_urls: vec![],
            occurred_at: Utc::now(),
        };
        let consumer = Arc::new(MessageConsumerStub::with_payloads([
            b"garbage".to_vec(),
            EventEnvelope::wrap(&deleted).to_vec().unwrap(),
        ]));
        let worker = worker(consumer.clone(), storage.clone());

        // Act
        let running = tokio::spawn({
            let worker = worker.clone();
            async move { worker.start(CancellationToken::new()).await }
        });
        tokio::time::sleep(Duration::from_millis(50)).await;
        worker.stop();

        // Assert
        let result = tokio::time::timeout(Duration::from_secs(1), running).await;
        assert!(result.unwrap().unwrap().is_ok());
        assert_eq!(consumer.delivered(), 2);
        assert!(!storage.contains(&orphan));
    }

    #[tokio::test]
    async fn test_cancellation_lets_in_flight_message_finish() {
        // Arrange : suppression lente, le handler est bloqué au moment de l'arrêt
        let storage = Arc::new(FileStorageStub::new().with_delete_delay(Duration::from_millis(300)));
        let orphan = storage.seed("a.png");
        let deleted = PostEvent::PostDeleted {
            post_id: PostId::new(),
            owner_id: None,
            media_urls: vec![orphan.clone()],
            files_urls: vec![],
            occurred_at: Utc::now(),
        };
        let consumer = Arc::new(MessageConsumerStub::with_payloads([
            EventEnvelope::wrap(&deleted).to_vec().unwrap(),
        ]));
        let worker = worker(consumer.clone(), storage.clone());
        let parent = CancellationToken::new();

        let running = tokio::spawn({
            let worker = worker.clone();
            let parent = parent.clone();
            async move { worker.start(parent).await }
        });
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(storage.delete_calls(), 1);
        assert_eq!(consumer.delivered(), 0);

        // Act
        parent.cancel();

        // Assert : le message en cours va à son terme
        let result = tokio::time::timeout(Duration::from_secs(2), running).await;
        assert!(result.unwrap().unwrap().is_ok());
        assert_eq!(consumer.delivered(), 1);
        assert!(!storage.contains(&orphan));
    }

    #[tokio::test]
    async fn test_parent_cancellation_stops_worker() {
        let consumer = Arc::new(MessageConsumerStub::new());
        let worker = worker(consumer, Arc::new(FileStorageStub::new()));
        let parent = CancellationToken::new();

        let running = tokio::spawn({
            let worker = worker.clone();
            let parent = parent.clone();
            async move { worker.start(parent).await }
        });
        parent.cancel();

        let result = tokio::time::timeout(Duration::from_secs(1), running).await;
        assert!(result.is_ok());
    }
}
