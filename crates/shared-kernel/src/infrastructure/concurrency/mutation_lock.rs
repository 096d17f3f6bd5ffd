// crates/shared-kernel/src/infrastructure/concurrency/mutation_lock.rs

//! Lease de courte durée au-dessus du cache (SET NX PX).
//!
//! `try_acquire` est non bloquant : `None` veut dire "quelqu'un d'autre travaille déjà
//! sur cette clé", ce n'est pas une erreur. La libération est un compare-and-delete
//! sur le jeton du lease : un détenteur lent dont le TTL a expiré ne peut pas
//! supprimer le lease d'un autre.

use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;
use crate::domain::repositories::CacheRepository;
use crate::errors::{AppResult, DomainError};
use crate::infrastructure::retry::{with_retry, RetryConfig};

#[derive(Clone)]
pub struct MutationLock {
    cache: Arc<dyn CacheRepository>,
}

impl MutationLock {
    pub fn new(cache: Arc<dyn CacheRepository>) -> Self {
        Self { cache }
    }

    /// Une seule tentative. `Ok(None)` si la clé est déjà détenue.
    pub async fn try_acquire(&self, key: &str, ttl: Duration) -> AppResult<Option<Lease>> {
        let token = Uuid::new_v4().to_string();

        if !self.cache.set_if_absent(key, &token, ttl).await? {
            tracing::debug!(key, "🔒 Lease already held");
            return Ok(None);
        }

        Ok(Some(Lease {
            key: key.to_string(),
            token,
            cache: self.cache.clone(),
            released: false,
        }))
    }

    /// Retente l'acquisition avec backoff exponentiel tant que la clé est détenue.
    /// `retry.max_retries == 0` équivaut à `try_acquire`.
    pub async fn acquire_with_retry(
        &self,
        key: &str,
        ttl: Duration,
        retry: RetryConfig,
    ) -> AppResult<Option<Lease>> {
        let attempt = with_retry(retry, || async move {
            match self.try_acquire(key, ttl).await {
                Ok(Some(lease)) => Ok(lease),
                Ok(None) => Err(DomainError::ConcurrencyConflict {
                    reason: format!("lease '{key}' is held"),
                }),
                Err(e) => Err(DomainError::from(e)),
            }
        })
        .await;

        match attempt {
            Ok(lease) => Ok(Some(lease)),
            Err(DomainError::TooManyConflicts(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Preuve de détention d'une clé. Libéré explicitement via `release`,
/// sinon au `Drop` par une tâche best-effort sur le runtime courant.
pub struct Lease {
    key: String,
    token: String,
    cache: Arc<dyn CacheRepository>,
    released: bool,
}

impl Lease {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// `Ok(false)` si le lease avait déjà expiré (ou a été repris par un autre détenteur).
    pub async fn release(mut self) -> AppResult<bool> {
        self.released = true;
        let deleted = self.cache.delete_if_equals(&self.key, &self.token).await?;
        if !deleted {
            tracing::warn!(key = %self.key, "⏳ Lease expired before release");
        }
        Ok(deleted)
    }
}

impl std::fmt::Debug for Lease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lease")
            .field("key", &self.key)
            .field("released", &self.released)
            .finish()
    }
}

impl Drop for Lease {
    fn drop(&mut self) {
        if self.released {
            return;
        }

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(key = %self.key, "No runtime to release lease, waiting for TTL");
            return;
        };

        let cache = self.cache.clone();
        let key = std::mem::take(&mut self.key);
        let token = std::mem::take(&mut self.token);
        handle.spawn(async move {
            if let Err(e) = cache.delete_if_equals(&key, &token).await {
                tracing::warn!(key = %key, error = %e, "Failed to release dropped lease");
            }
        });
    }
}
