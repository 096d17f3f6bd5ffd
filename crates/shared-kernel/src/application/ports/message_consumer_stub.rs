// crates/shared-kernel/src/application/ports/message_consumer_stub.rs

use crate::application::ports::{MessageConsumer, MessageHandler};
use crate::errors::AppResult;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio_util::sync::CancellationToken;

/// Rejoue les payloads en file puis attend l'annulation, comme un broker vide.
#[derive(Default)]
pub struct MessageConsumerStub {
    queue: Mutex<VecDeque<Vec<u8>>>,
    pub delivered: AtomicUsize,
    pub handler_errors: AtomicUsize,
}

impl MessageConsumerStub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payloads(payloads: impl IntoIterator<Item = Vec<u8>>) -> Self {
        let stub = Self::default();
        stub.queue.lock().unwrap().extend(payloads);
        stub
    }

    pub fn push(&self, payload: Vec<u8>) {
        self.queue.lock().unwrap().push_back(payload);
    }

    pub fn delivered(&self) -> usize {
        self.delivered.load(Ordering::SeqCst)
    }

    fn next(&self) -> Option<Vec<u8>> {
        self.queue.lock().unwrap().pop_front()
    }
}

#[async_trait]
impl MessageConsumer for MessageConsumerStub {
    async fn consume(
        &self,
        _topics: &[&str],
        handler: MessageHandler,
        shutdown: CancellationToken,
    ) -> AppResult<()> {
        while !shutdown.is_cancelled() {
            match self.next() {
                Some(payload) => {
                    if let Err(e) = handler(payload).await {
                        tracing::error!(error = %e, "Handler failed for message");
                        self.handler_errors.fetch_add(1, Ordering::SeqCst);
                    }
                    self.delivered.fetch_add(1, Ordering::SeqCst);
                }
                None => shutdown.cancelled().await,
            }
        }
        Ok(())
    }
}
