// crates/shared-kernel/src/errors/result.rs

use crate::errors::{AppError, DomainError};

/// Domaine et use cases (entités, ports, services)
pub type Result<T> = std::result::Result<T, DomainError>;

/// Adaptateurs, workers et binaires
pub type AppResult<T> = std::result::Result<T, AppError>;
