// crates/shared-kernel/src/domain/entities/entity.rs

use chrono::{DateTime, Utc};
use crate::domain::Identifier;
use crate::errors::DomainError;

/// Nom porté par les erreurs `NotFound` et les mappers SQL.
pub trait EntityMetadata {
    fn entity_name() -> &'static str;

    fn not_found(id: impl ToString) -> DomainError {
        DomainError::NotFound {
            entity: Self::entity_name(),
            id: id.to_string(),
        }
    }
}

pub trait Entity: EntityMetadata {
    type Id: Identifier;

    fn id(&self) -> &Self::Id;
    fn created_at(&self) -> DateTime<Utc>;
    fn updated_at(&self) -> DateTime<Utc>;
}

/// `Option<E>` → `NotFound` nommé d'après l'entité
pub trait EntityOptionExt<E> {
    fn ok_or_not_found(self, id: impl ToString) -> Result<E, DomainError>;
}

impl<E: EntityMetadata> EntityOptionExt<E> for Option<E> {
    fn ok_or_not_found(self, id: impl ToString) -> Result<E, DomainError> {
        self.ok_or_else(|| E::not_found(id))
    }
}
