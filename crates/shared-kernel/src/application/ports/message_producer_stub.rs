// crates/shared-kernel/src/application/ports/message_producer_stub.rs

use crate::application::ports::MessageProducer;
use crate::domain::events::EventEnvelope;
use crate::errors::{AppError, AppResult, ErrorCode};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Enregistre les enveloppes publiées au lieu de les envoyer.
#[derive(Default)]
pub struct MessageProducerStub {
    pub published: Mutex<Vec<EventEnvelope>>,
    pub fail_all: AtomicBool,
}

impl MessageProducerStub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail_all.store(failing, Ordering::SeqCst);
    }

    pub fn published(&self) -> Vec<EventEnvelope> {
        self.published.lock().unwrap().clone()
    }

    pub fn event_types(&self) -> Vec<String> {
        self.published
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.event_type.clone())
            .collect()
    }

    /// Payloads tels qu'ils partiraient sur le fil (rejouables dans un consumer)
    pub fn payloads(&self) -> Vec<Vec<u8>> {
        self.published
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| e.to_vec().ok())
            .collect()
    }

    fn check(&self) -> AppResult<()> {
        if self.fail_all.load(Ordering::SeqCst) {
            return Err(AppError::new(ErrorCode::InfrastructureFailure, "Broker Down"));
        }
        Ok(())
    }
}

#[async_trait]
impl MessageProducer for MessageProducerStub {
    async fn publish(&self, event: &EventEnvelope) -> AppResult<()> {
        self.check()?;
        self.published.lock().unwrap().push(event.clone());
        Ok(())
    }

    async fn publish_batch(&self, events: &[EventEnvelope]) -> AppResult<()> {
        self.check()?;
        self.published.lock().unwrap().extend_from_slice(events);
        Ok(())
    }

    async fn flush(&self, _timeout: Duration) -> AppResult<()> {
        self.check()
    }
}
