// crates/shared-kernel/src/errors/error.rs

use thiserror::Error;
use crate::errors::AppError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Validation failed for field '{field}': {reason}")]
    Validation {
        field: &'static str,
        reason: String
    },

    #[error("{entity} not found with id '{id}'")]
    NotFound {
        entity: &'static str,
        id: String
    },

    /// L'identité est valide mais ne possède pas la ressource (ex: post d'un autre auteur)
    #[error("Permission denied: {reason}")]
    PermissionDenied {
        reason: String
    },

    /// Échec d'un lot d'upload vers l'object store (tout ou rien)
    #[error("Upload failed: {reason}")]
    UploadFailed {
        reason: String
    },

    /// Erreur de concurrence (lease détenu, version mismatch)
    #[error("Concurrency conflict: {reason}")]
    ConcurrencyConflict {
        reason: String
    },

    /// Échec définitif après plusieurs tentatives de retry
    #[error("Operation failed after maximum retries: {0}")]
    TooManyConflicts(String),

    /// Le store de référence (Postgres) a échoué
    #[error("Store failure: {0}")]
    StoreFailure(String),

    #[error("Internal domain error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Utilisé par la boucle de Retry
    pub fn is_concurrency_conflict(&self) -> bool {
        matches!(self, Self::ConcurrencyConflict { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<AppError> for DomainError {
    fn from(err: AppError) -> Self {
        match err.code {
            crate::errors::ErrorCode::NotFound => DomainError::NotFound {
                entity: "Resource",
                id: "unknown".into()
            },
            crate::errors::ErrorCode::StoreFailure => DomainError::StoreFailure(err.message),
            _ => DomainError::Internal(err.message),
        }
    }
}
