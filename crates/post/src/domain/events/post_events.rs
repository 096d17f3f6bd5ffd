// crates/post/src/domain/events/post_events.rs

use std::borrow::Cow;
use std::collections::HashSet;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};
use shared_kernel::domain::events::{DomainEvent, EventEnvelope};
use shared_kernel::domain::value_objects::{PostId, Url, UserId};
use thiserror::Error;

/// Événements de mutation d'un post, portés par l'enveloppe `{type, data}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PostEvent {
    PostCreated {
        post_id: PostId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        owner_id: Option<UserId>,
        #[serde(default = "Utc::now")]
        occurred_at: DateTime<Utc>,
    },

    /// `*_old_urls` : instantané avant l'écriture, `*_new_urls` : après.
    PostUpdated {
        post_id: PostId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        owner_id: Option<UserId>,
        #[serde(default, deserialize_with = "null_as_empty")]
        media_new_urls: Vec<Url>,
        #[serde(default, deserialize_with = "null_as_empty")]
        media_old_urls: Vec<Url>,
        #[serde(default, deserialize_with = "null_as_empty")]
        files_new_urls: Vec<Url>,
        #[serde(default, deserialize_with = "null_as_empty")]
        files_old_urls: Vec<Url>,
        #[serde(default = "Utc::now")]
        occurred_at: DateTime<Utc>,
    },

    /// Les URLs sont toutes orphelines après la suppression
    PostDeleted {
        post_id: PostId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        owner_id: Option<UserId>,
        #[serde(default, deserialize_with = "null_as_empty")]
        media_urls: Vec<Url>,
        #[serde(default, deserialize_with = "null_as_empty")]
        files_urls: Vec<Url>,
        #[serde(default = "Utc::now")]
        occurred_at: DateTime<Utc>,
    },
}

/// Échec de décodage d'une enveloppe en `PostEvent`
#[derive(Debug, Clone, Error, PartialEq)]
pub enum EventDecodeError {
    #[error("unknown event type '{0}'")]
    UnknownType(String),

    #[error("malformed '{event_type}' payload: {reason}")]
    Malformed { event_type: String, reason: String },
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Url>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<Url>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl PostEvent {
    pub const AGGREGATE_TYPE: &'static str = "post";
    pub const KNOWN_TYPES: [&'static str; 3] = ["PostCreated", "PostUpdated", "PostDeleted"];

    /// Valeur du champ `type` de l'enveloppe
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PostCreated { .. } => "PostCreated",
            Self::PostUpdated { .. } => "PostUpdated",
            Self::PostDeleted { .. } => "PostDeleted",
        }
    }

    pub fn post_id(&self) -> &PostId {
        match self {
            Self::PostCreated { post_id, .. }
            | Self::PostUpdated { post_id, .. }
            | Self::PostDeleted { post_id, .. } => post_id,
        }
    }

    pub fn owner_id(&self) -> Option<&UserId> {
        match self {
            Self::PostCreated { owner_id, .. }
            | Self::PostUpdated { owner_id, .. }
            | Self::PostDeleted { owner_id, .. } => owner_id.as_ref(),
        }
    }

    /// URLs à supprimer de l'object store après cet événement.
    /// Pour un update : `old \ new`, calculé par groupe, et jamais une URL présente dans un `new`.
    pub fn orphaned_urls(&self) -> Vec<Url> {
        match self {
            Self::PostCreated { .. } => Vec::new(),
            Self::PostUpdated {
                media_new_urls,
                media_old_urls,
                files_new_urls,
                files_old_urls,
                ..
            } => {
                let keep: HashSet<&Url> = media_new_urls.iter().chain(files_new_urls).collect();
                let mut seen = HashSet::new();

                let media_orphans = media_old_urls.iter().filter(|u| !media_new_urls.contains(u));
                let files_orphans = files_old_urls.iter().filter(|u| !files_new_urls.contains(u));

                media_orphans
                    .chain(files_orphans)
                    .filter(|u| !keep.contains(u))
                    .filter(|u| seen.insert(*u))
                    .cloned()
                    .collect()
            }
            Self::PostDeleted { media_urls, files_urls, .. } => {
                media_urls.iter().chain(files_urls).cloned().collect()
            }
        }
    }

    pub fn from_envelope(envelope: &EventEnvelope) -> Result<Self, EventDecodeError> {
        if !Self::KNOWN_TYPES.contains(&envelope.event_type.as_str()) {
            return Err(EventDecodeError::UnknownType(envelope.event_type.clone()));
        }

        let tagged = json!({ "type": envelope.event_type, "data": envelope.payload });
        serde_json::from_value(tagged).map_err(|e| EventDecodeError::Malformed {
            event_type: envelope.event_type.clone(),
            reason: e.to_string(),
        })
    }
}

impl TryFrom<&EventEnvelope> for PostEvent {
    type Error = EventDecodeError;

    fn try_from(envelope: &EventEnvelope) -> Result<Self, Self::Error> {
        Self::from_envelope(envelope)
    }
}

impl DomainEvent for PostEvent {
    fn event_type(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.kind())
    }

    fn aggregate_type(&self) -> Cow<'_, str> {
        Cow::Borrowed(Self::AGGREGATE_TYPE)
    }

    fn aggregate_id(&self) -> String {
        self.post_id().to_string()
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            Self::PostCreated { occurred_at, .. }
            | Self::PostUpdated { occurred_at, .. }
            | Self::PostDeleted { occurred_at, .. } => *occurred_at,
        }
    }

    /// Contenu du champ `data`
    fn payload(&self) -> Value {
        match serde_json::to_value(self) {
            Ok(Value::Object(mut tagged)) => tagged.remove("data").unwrap_or(Value::Null),
            _ => Value::Null,
        }
    }
}
