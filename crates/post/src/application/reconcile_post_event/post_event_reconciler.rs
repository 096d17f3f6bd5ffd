// crates/post/src/application/reconcile_post_event/post_event_reconciler.rs

//! Réconciliation cache / object store après une mutation de post.
//!
//! Par message : `Received → LockAttempt → {Skipped | Processing} → Done`.
//! Les updates et deletes prennent un lease par post, les reconstructions de
//! listes prennent le lease global. Un lease détenu ailleurs fait sauter le
//! message sans aucune mutation. Tout échec est journalisé et absorbé : le TTL
//! du cache et la prochaine mutation rétablissent la cohérence.

use std::sync::Arc;
use tokio::time::Instant;
use shared_kernel::application::ToDto;
use shared_kernel::domain::events::EventEnvelope;
use shared_kernel::domain::repositories::CacheRepository;
use shared_kernel::domain::value_objects::{PostId, Url, UserId};
use shared_kernel::infrastructure::concurrency::{Lease, MutationLock};
use shared_kernel::infrastructure::pagination::PageRequest;

use crate::application::cache_keys;
use crate::application::list_posts::load_page;
use crate::application::reconcile_post_event::{ReconcileError, ReconcileOutcome, ReconcilerSettings};
use crate::application::views::PostView;
use crate::domain::events::{EventDecodeError, PostEvent};
use crate::domain::repositories::{FileStorage, PostFilter, PostRepository};

pub struct PostEventReconciler {
    repo: Arc<dyn PostRepository>,
    cache: Arc<dyn CacheRepository>,
    storage: Arc<dyn FileStorage>,
    lock: MutationLock,
    settings: ReconcilerSettings,
}

impl PostEventReconciler {
    pub fn new(
        repo: Arc<dyn PostRepository>,
        cache: Arc<dyn CacheRepository>,
        storage: Arc<dyn FileStorage>,
        settings: ReconcilerSettings,
    ) -> Self {
        let lock = MutationLock::new(cache.clone());
        Self { repo, cache, storage, lock, settings }
    }

    /// Point d'entrée du consumer : octets bruts reçus du bus
    pub async fn handle_payload(&self, payload: &[u8]) -> ReconcileOutcome {
        let envelope = match EventEnvelope::from_slice(payload) {
            Ok(envelope) => envelope,
            Err(e) => {
                let err = ReconcileError::DeserializationFailed(e.to_string());
                tracing::warn!(error = %err, "🗑️ Dropping undecodable message");
                return ReconcileOutcome::Dropped(err);
            }
        };

        let event = match PostEvent::from_envelope(&envelope) {
            Ok(event) => event,
            Err(EventDecodeError::UnknownType(event_type)) => {
                let err = ReconcileError::UnknownEventType(event_type);
                tracing::warn!(error = %err, "🗑️ Dropping message");
                return ReconcileOutcome::Dropped(err);
            }
            Err(e @ EventDecodeError::Malformed { .. }) => {
                let err = ReconcileError::DeserializationFailed(e.to_string());
                tracing::warn!(event_type = %envelope.event_type, error = %err, "🗑️ Dropping message");
                return ReconcileOutcome::Dropped(err);
            }
        };

        self.handle(&event).await
    }

    pub async fn handle(&self, event: &PostEvent) -> ReconcileOutcome {
        let post_id = *event.post_id();

        let outcome = match event {
            PostEvent::PostCreated { owner_id, .. } => {
                // Pas encore d'entrée par post : seules les listes sont périmées
                let lease = match self.acquire(cache_keys::GLOBAL_UPDATE_LOCK).await {
                    Ok(lease) => lease,
                    Err(err) => return Self::skipped(post_id, err),
                };
                let failures = self.rebuild_lists(owner_id.as_ref()).await;
                self.release(lease).await;
                ReconcileOutcome::from_failures(failures)
            }

            PostEvent::PostUpdated { .. } => {
                let lease = match self.acquire(&cache_keys::post_lock(&post_id)).await {
                    Ok(lease) => lease,
                    Err(err) => return Self::skipped(post_id, err),
                };

                // 1. Orphelins : old \ new, jamais une URL encore référencée
                let mut failures = self.delete_objects(&event.orphaned_urls()).await;

                // 2. Éviction puis remplissage depuis le store de référence
                self.evict(&cache_keys::post(&post_id)).await;
                if let Err(err) = self.refill(&post_id).await {
                    failures.push(err);
                }

                self.release(lease).await;
                ReconcileOutcome::from_failures(failures)
            }

            PostEvent::PostDeleted { owner_id, .. } => {
                let lease = match self.acquire(&cache_keys::post_lock(&post_id)).await {
                    Ok(lease) => lease,
                    Err(err) => return Self::skipped(post_id, err),
                };

                let mut failures = self.delete_objects(&event.orphaned_urls()).await;
                self.evict(&cache_keys::post(&post_id)).await;
                self.release(lease).await;

                if self.settings.rebuild_lists_on_delete {
                    failures.extend(self.rebuild_lists_if_free(owner_id.as_ref()).await);
                }

                ReconcileOutcome::from_failures(failures)
            }
        };

        match &outcome {
            ReconcileOutcome::Reconciled => {
                tracing::info!(post_id = %post_id, event_type = event.kind(), "✅ Reconciled");
            }
            ReconcileOutcome::Incomplete(failures) => {
                tracing::warn!(
                    post_id = %post_id,
                    event_type = event.kind(),
                    failures = failures.len(),
                    "⚠️ Reconciled with failures"
                );
            }
            _ => {}
        }

        outcome
    }

    // --- Lease ---

    async fn acquire(&self, key: &str) -> Result<Lease, ReconcileError> {
        match self
            .lock
            .acquire_with_retry(key, self.settings.lock_ttl, self.settings.lock_retry)
            .await
        {
            Ok(Some(lease)) => Ok(lease),
            Ok(None) => Err(ReconcileError::LockUnavailable {
                key: key.to_string(),
                reason: "held by another worker".to_string(),
            }),
            Err(e) => Err(ReconcileError::LockUnavailable {
                key: key.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    async fn release(&self, lease: Lease) {
        let key = lease.key().to_string();
        if let Err(e) = lease.release().await {
            tracing::warn!(key = %key, error = %e, "Lease release failed, waiting for TTL");
        }
    }

    fn skipped(post_id: PostId, err: ReconcileError) -> ReconcileOutcome {
        tracing::info!(post_id = %post_id, reason = %err, "⏭️ Skipping message");
        ReconcileOutcome::Skipped(err)
    }

    // --- Object store ---

    /// Chaque URL est tentée, un échec n'interrompt pas le lot.
    /// L'ensemble tient dans `cleanup_budget` : le lease ne doit pas expirer en cours de route.
    async fn delete_objects(&self, urls: &[Url]) -> Vec<ReconcileError> {
        let deadline = Instant::now() + self.settings.cleanup_budget();
        let mut failures = Vec::new();

        for url in urls {
            let remaining = deadline.saturating_duration_since(Instant::now());

            let result = if remaining.is_zero() {
                Err("lease budget exhausted, left for the next mutation".to_string())
            } else {
                let timeout = self.settings.delete_timeout(remaining);
                match tokio::time::timeout(timeout, self.storage.delete(url)).await {
                    Ok(result) => result.map_err(|e| e.to_string()),
                    Err(_) => Err(format!("timed out after {timeout:?}")),
                }
            };

            match result {
                Ok(()) => tracing::debug!(url = %url, "🧹 Orphaned object deleted"),
                Err(reason) => {
                    let err = ReconcileError::StorageCleanupFailed { url: url.clone(), reason };
                    tracing::warn!(error = %err, "⚠️ Storage cleanup failed");
                    failures.push(err);
                }
            }
        }

        failures
    }

    // --- Cache ---

    async fn evict(&self, key: &str) {
        if let Err(e) = self.cache.delete(key).await {
            tracing::warn!(key, error = %e, "⚠️ Cache eviction failed");
        }
    }

    async fn store<T: serde::Serialize>(&self, key: &str, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(key, error = %e, "Cannot serialize cache value");
                return;
            }
        };

        if let Err(e) = self.cache.set(key, &json, Some(self.settings.cache_ttl)).await {
            tracing::warn!(key, error = %e, "⚠️ Cache fill failed");
        }
    }

    /// Relit le post et remplit `post:<id>`. Un échec laisse le cache froid.
    async fn refill(&self, post_id: &PostId) -> Result<(), ReconcileError> {
        match self.repo.fetch(post_id).await {
            Ok(Some(post)) => {
                let view: PostView = post.to_dto();
                self.store(&cache_keys::post(post_id), &view).await;
                Ok(())
            }
            Ok(None) => {
                tracing::warn!(post_id = %post_id, "Post vanished before refill, cache left cold");
                Err(ReconcileError::RefetchFailed {
                    post_id: *post_id,
                    reason: "post no longer exists".to_string(),
                })
            }
            Err(e) => {
                tracing::error!(post_id = %post_id, error = %e, "❌ Refetch failed, cache left cold");
                Err(ReconcileError::RefetchFailed { post_id: *post_id, reason: e.to_string() })
            }
        }
    }

    /// Invalide toutes les pages de listes puis réchauffe la première page globale.
    /// L'appelant détient le lease global.
    async fn rebuild_lists(&self, owner_id: Option<&UserId>) -> Vec<ReconcileError> {
        let mut patterns = vec![cache_keys::LIST_PAGES_PATTERN.to_string()];
        patterns.extend(owner_id.map(cache_keys::user_pages_pattern));

        for pattern in &patterns {
            if let Err(e) = self.cache.invalidate_pattern(pattern).await {
                tracing::warn!(pattern = %pattern, error = %e, "⚠️ List invalidation failed");
            }
        }

        let first = PageRequest::first();
        match load_page(self.repo.as_ref(), &PostFilter::all(), first).await {
            Ok(view) => {
                self.store(&cache_keys::list_page(first), &view).await;
                tracing::debug!(total = view.total, "🔄 List cache rebuilt");
                Vec::new()
            }
            Err(e) => {
                tracing::error!(error = %e, "❌ List rebuild failed, pages left cold");
                vec![ReconcileError::ListRebuildFailed(e.to_string())]
            }
        }
    }

    /// Reconstruction opportuniste : si un autre worker reconstruit déjà, on le laisse faire.
    async fn rebuild_lists_if_free(&self, owner_id: Option<&UserId>) -> Vec<ReconcileError> {
        match self
            .lock
            .try_acquire(cache_keys::GLOBAL_UPDATE_LOCK, self.settings.lock_ttl)
            .await
        {
            Ok(Some(lease)) => {
                let failures = self.rebuild_lists(owner_id).await;
                self.release(lease).await;
                failures
            }
            Ok(None) => {
                tracing::debug!("List rebuild already in progress elsewhere");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Cannot take list lease, skipping rebuild");
                Vec::new()
            }
        }
    }
}
