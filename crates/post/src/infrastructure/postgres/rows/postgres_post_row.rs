// crates/post/src/infrastructure/postgres/rows/postgres_post_row.rs

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use shared_kernel::domain::entities::Entity;
use shared_kernel::domain::value_objects::{Counter, PostId, UserId};
use shared_kernel::domain::Identifier;
use shared_kernel::errors::{DomainError, Result};
use sqlx::FromRow;
use uuid::Uuid;

use crate::domain::entities::Post;
use crate::domain::value_objects::FileGroup;

#[derive(FromRow, Debug)]
pub struct PostgresPostRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub content: String,
    pub media: JsonValue,
    pub files: JsonValue,
    pub like_count: i64,
    pub repost_count: i64,
    pub comment_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Post> for PostgresPostRow {
    fn from(p: &Post) -> Self {
        Self {
            id: p.id().as_uuid(),
            owner_id: p.owner_id().as_uuid(),
            content: p.content().to_string(),
            media: serde_json::to_value(p.media()).unwrap_or(JsonValue::Array(vec![])),
            files: serde_json::to_value(p.files()).unwrap_or(JsonValue::Array(vec![])),
            like_count: p.like_count().into(),
            repost_count: p.repost_count().into(),
            comment_count: p.comment_count().into(),
            created_at: p.created_at(),
            updated_at: p.updated_at(),
        }
    }
}

fn groups(value: JsonValue, column: &str) -> Result<Vec<FileGroup>> {
    // NULL en base = aucune pièce jointe
    if value.is_null() {
        return Ok(Vec::new());
    }
    serde_json::from_value(value)
        .map_err(|e| DomainError::Internal(format!("Failed to deserialize {column}: {e}")))
}

impl TryFrom<PostgresPostRow> for Post {
    type Error = DomainError;

    fn try_from(row: PostgresPostRow) -> Result<Self> {
        // Les CHECK garantissent des compteurs positifs, on revérifie quand même à la frontière
        let counter = |value: i64, column: &str| {
            Counter::try_from(value)
                .map_err(|_| DomainError::Internal(format!("Negative {column} in database")))
        };

        Ok(Post::restore(
            PostId::from_uuid(row.id),
            UserId::from_uuid(row.owner_id),
            row.content,
            groups(row.media, "media")?,
            groups(row.files, "files")?,
            counter(row.like_count, "like_count")?,
            counter(row.repost_count, "repost_count")?,
            counter(row.comment_count, "comment_count")?,
            row.created_at,
            row.updated_at,
        ))
    }
}
