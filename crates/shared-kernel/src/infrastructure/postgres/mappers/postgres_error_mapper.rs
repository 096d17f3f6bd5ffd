// crates/shared-kernel/src/infrastructure/postgres/mappers/postgres_error_mapper.rs

use crate::domain::entities::EntityMetadata;
use crate::errors::DomainError;

pub trait SqlxErrorExt<T> {
    fn map_domain<E: EntityMetadata>(self) -> Result<T, DomainError>;
    fn map_domain_infra(self, context: &'static str) -> Result<T, DomainError>;
}

impl<T> SqlxErrorExt<T> for std::result::Result<T, sqlx::Error> {
    fn map_domain<E: EntityMetadata>(self) -> Result<T, DomainError> {
        self.map_err(|e| {
            match e {
                sqlx::Error::RowNotFound => DomainError::NotFound {
                    entity: E::entity_name(),
                    id: "unknown".into(),
                },
                sqlx::Error::Database(db_err) => {
                    // Concurrence (Code Postgres 40001, serialization_failure)
                    if db_err.code().map(|c| c == "40001").unwrap_or(false) {
                        return DomainError::ConcurrencyConflict {
                            reason: format!("Concurrency conflict on {}", E::entity_name()),
                        };
                    }

                    DomainError::StoreFailure(db_err.message().into())
                }
                _ => DomainError::StoreFailure(e.to_string()),
            }
        })
    }

    fn map_domain_infra(self, context: &'static str) -> Result<T, DomainError> {
        self.map_err(|e| DomainError::StoreFailure(format!("{}: {}", context, e)))
    }
}
