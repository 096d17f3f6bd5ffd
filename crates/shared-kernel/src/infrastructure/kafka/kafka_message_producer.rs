// crates/shared-kernel/src/infrastructure/kafka/kafka_message_producer.rs

use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::message::{Header, OwnedHeaders};
use rdkafka::producer::{FutureProducer, FutureRecord, Producer};
use std::time::Duration;
use crate::application::ports::MessageProducer;
use crate::domain::events::EventEnvelope;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::infrastructure::kafka::KafkaConfig;

pub struct KafkaMessageProducer {
    producer: FutureProducer,
    default_topic: String,
}

impl KafkaMessageProducer {
    pub fn new(config: &KafkaConfig) -> AppResult<Self> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", &config.brokers)
            .set("message.timeout.ms", "5000")
            .set("compression.type", "snappy")
            .set("acks", "all")
            .set("linger.ms", "10")
            .create()
            .map_err(|e| AppError::new(ErrorCode::InfrastructureFailure, format!("Kafka config error: {e}")))?;

        Ok(Self { producer, default_topic: config.topic.clone() })
    }

    fn encode(event: &EventEnvelope) -> AppResult<String> {
        serde_json::to_string(event)
            .map_err(|e| AppError::new(ErrorCode::InternalError, e.to_string()))
    }

    fn record<'a>(&'a self, event: &'a EventEnvelope, payload: &'a str) -> FutureRecord<'a, String, str> {
        FutureRecord::to(&self.default_topic)
            .payload(payload)
            .key(&event.aggregate_id)
            .headers(OwnedHeaders::new().insert(Header {
                key: "event_type",
                value: Some(&event.event_type), // ex: "PostUpdated"
            }))
    }
}

#[async_trait]
impl MessageProducer for KafkaMessageProducer {
    async fn publish(&self, event: &EventEnvelope) -> AppResult<()> {
        let payload = Self::encode(event)?;

        self.producer
            .send(self.record(event, &payload), Duration::from_secs(5))
            .await
            .map_err(|(e, _)| AppError::from(e))?;

        Ok(())
    }

    async fn publish_batch(&self, events: &[EventEnvelope]) -> AppResult<()> {
        // Les payloads doivent survivre aux futures d'envoi
        let payloads = events
            .iter()
            .map(Self::encode)
            .collect::<AppResult<Vec<String>>>()?;

        let futures: Vec<_> = events
            .iter()
            .zip(&payloads)
            .map(|(event, payload)| self.producer.send(self.record(event, payload), Duration::from_secs(0)))
            .collect();

        for future in futures {
            future.await.map_err(|(e, _)| AppError::from(e))?;
        }

        Ok(())
    }

    async fn flush(&self, timeout: Duration) -> AppResult<()> {
        let producer = self.producer.clone();
        // flush() est bloquant côté librdkafka
        tokio::task::spawn_blocking(move || producer.flush(timeout))
            .await
            .map_err(|e| AppError::new(ErrorCode::InternalError, e.to_string()))?
            .map_err(AppError::from)
    }
}
