// crates/shared-kernel/src/infrastructure/kafka/kafka_message_consumer.rs

use crate::application::ports::{MessageConsumer, MessageHandler};
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::infrastructure::kafka::KafkaConfig;
use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{Consumer, StreamConsumer};
use rdkafka::message::Message;
use tokio_util::sync::CancellationToken;

/// Worker logique unique par membre du consumer group : un message à la fois.
pub struct KafkaMessageConsumer {
    client_config: ClientConfig,
}

impl KafkaMessageConsumer {
    pub fn new(config: &KafkaConfig) -> Self {
        let mut client_config = ClientConfig::new();
        client_config
            .set("bootstrap.servers", &config.brokers)
            .set("group.id", &config.group_id)
            .set("enable.auto.commit", "true")
            .set("auto.commit.interval.ms", "5000")
            .set("auto.offset.reset", "earliest") // Ne rate rien au démarrage
            .set("session.timeout.ms", "45000")
            .set("max.poll.interval.ms", "300000");

        Self { client_config }
    }
}

#[async_trait]
impl MessageConsumer for KafkaMessageConsumer {
    async fn consume(
        &self,
        topics: &[&str],
        handler: MessageHandler,
        shutdown: CancellationToken,
    ) -> AppResult<()> {
        let consumer: StreamConsumer = self.client_config.create()?;
        consumer
            .subscribe(topics)
            .map_err(|e| AppError::new(ErrorCode::InfrastructureFailure, e.to_string()))?;

        log::info!("📥 Kafka consumer subscribed to {:?}", topics);

        while !shutdown.is_cancelled() {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                result = consumer.recv() => {
                    match result {
                        Ok(message) => {
                            let Some(payload) = message.payload().map(|p| p.to_vec()) else {
                                log::warn!("⚠️ Empty Kafka payload at offset {}", message.offset());
                                continue;
                            };

                            // Traitement inline : l'annulation n'interrompt jamais un message en cours
                            if let Err(e) = handler(payload).await {
                                log::error!("❌ Handler failed for message: {}", e);
                            }
                        }
                        // Erreur de transport : on log et on reboucle
                        Err(e) => log::error!("Kafka receive error: {}", e),
                    }
                }
            }
        }

        log::info!("🛑 Kafka consumer loop stopped.");
        Ok(())
    }
}
