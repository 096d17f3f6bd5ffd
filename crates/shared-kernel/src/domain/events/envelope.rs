// crates/shared-kernel/src/domain/events/envelope.rs

use std::borrow::Cow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use crate::domain::events::DomainEvent;

/// Enveloppe de transport `{type, data}`.
/// Seuls `type` et `data` sont obligatoires au décodage : les producteurs
/// minimalistes peuvent omettre le reste.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventEnvelope {
    #[serde(default = "Uuid::now_v7")]
    pub id: Uuid,
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub aggregate_type: String,
    #[serde(default)]
    pub aggregate_id: String,
    #[serde(rename = "data")]
    pub payload: Value,
    #[serde(default = "Utc::now")]
    pub occurred_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl EventEnvelope {
    pub fn wrap(event: &dyn DomainEvent) -> Self {
        Self {
            id: event.event_id(),
            event_type: event.event_type().into_owned(),
            aggregate_type: event.aggregate_type().into_owned(),
            aggregate_id: event.aggregate_id(),
            payload: event.payload(),
            occurred_at: event.occurred_at(),
            // Utilise l'ID de corrélation s'il existe
            metadata: event.correlation_id().map(|id| serde_json::json!({ "correlation_id": id })),
        }
    }

    /// Décode les octets bruts reçus du bus
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    pub fn to_vec(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}

// L'enveloppe se manipule comme n'importe quel événement du système.
impl DomainEvent for EventEnvelope {
    fn event_id(&self) -> Uuid { self.id }
    fn event_type(&self) -> Cow<'_, str> { Cow::Borrowed(&self.event_type) }
    fn aggregate_type(&self) -> Cow<'_, str> { Cow::Borrowed(&self.aggregate_type) }
    fn aggregate_id(&self) -> String { self.aggregate_id.clone() }
    fn occurred_at(&self) -> DateTime<Utc> { self.occurred_at }
    fn payload(&self) -> Value { self.payload.clone() }
    fn correlation_id(&self) -> Option<Uuid> {
        self.metadata.as_ref()
            .and_then(|m| m.get("correlation_id"))
            .and_then(|v| v.as_str())
            .and_then(|s| Uuid::parse_str(s).ok())
    }
}
