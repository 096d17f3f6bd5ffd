// crates/shared-kernel/src/infrastructure/kafka/kafka_config.rs

#[derive(Debug, Clone, PartialEq)]
pub struct KafkaConfig {
    pub brokers: String,
    pub topic: String,
    pub group_id: String,
}

impl Default for KafkaConfig {
    fn default() -> Self {
        Self {
            brokers: "localhost:9092".to_string(),
            topic: "post.events".to_string(),
            group_id: "post-cache-group".to_string(),
        }
    }
}

impl KafkaConfig {
    /// `KAFKA_BROKERS`, `POST_EVENTS_TOPIC`, `POST_CACHE_GROUP` avec valeurs par défaut
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            brokers: std::env::var("KAFKA_BROKERS").unwrap_or(defaults.brokers),
            topic: std::env::var("POST_EVENTS_TOPIC").unwrap_or(defaults.topic),
            group_id: std::env::var("POST_CACHE_GROUP").unwrap_or(defaults.group_id),
        }
    }

    pub fn with_brokers(mut self, brokers: impl Into<String>) -> Self {
        self.brokers = brokers.into();
        self
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    pub fn with_group_id(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = group_id.into();
        self
    }
}
