// crates/shared-kernel/src/domain/events/event.rs

use std::borrow::Cow;
use std::fmt::Debug;
use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

pub trait DomainEvent: Debug + Send + Sync {
    /// Identifiant unique de l'événement (pour l'idempotence)
    fn event_id(&self) -> Uuid {
        Uuid::now_v7()
    }

    /// Nom de l'événement (ex: "PostUpdated"), porté dans le champ `type` de l'enveloppe
    fn event_type(&self) -> Cow<'_, str>;

    /// Nom de l'agrégat (ex: "post")
    fn aggregate_type(&self) -> Cow<'_, str>;

    /// ID de l'agrégat, sert aussi de clé de partition Kafka
    fn aggregate_id(&self) -> String;

    /// Horodatage (quand c'est arrivé)
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Les données réelles en JSON (champ `data` de l'enveloppe)
    fn payload(&self) -> Value;

    /// ID de corrélation pour le traçage distribué
    fn correlation_id(&self) -> Option<Uuid> {
        None
    }
}
