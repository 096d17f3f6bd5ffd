// crates/post/src/application/reconcile_post_event/reconciler_settings.rs

use std::time::Duration;
use shared_kernel::infrastructure::retry::RetryConfig;

#[derive(Debug, Clone, Copy)]
pub struct ReconcilerSettings {
    /// TTL du lease : borne le blocage si un détenteur meurt
    pub lock_ttl: Duration,
    /// `max_retries == 0` : un lease détenu fait sauter le message
    pub lock_retry: RetryConfig,
    /// Deadline de chaque suppression dans l'object store, bornée par `cleanup_budget`
    pub storage_timeout: Duration,
    /// TTL des entrées remplies
    pub cache_ttl: Duration,
    pub rebuild_lists_on_delete: bool,
}

impl Default for ReconcilerSettings {
    fn default() -> Self {
        Self {
            lock_ttl: Duration::from_millis(5_000),
            lock_retry: RetryConfig { max_retries: 0, initial_backoff_ms: 50 },
            storage_timeout: Duration::from_millis(2_000),
            cache_ttl: Duration::from_secs(600),
            rebuild_lists_on_delete: true,
        }
    }
}

impl ReconcilerSettings {
    /// Temps total accordé au nettoyage sous lease : la moitié du TTL,
    /// le reste couvre éviction, remplissage et release.
    pub fn cleanup_budget(&self) -> Duration {
        self.lock_ttl / 2
    }

    /// Deadline effective d'une suppression, compte tenu du budget restant
    pub fn delete_timeout(&self, remaining: Duration) -> Duration {
        self.storage_timeout.min(remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cleanup_fits_in_the_lease() {
        let settings = ReconcilerSettings::default();

        assert!(settings.storage_timeout <= settings.cleanup_budget());
        assert!(settings.cleanup_budget() < settings.lock_ttl);
    }

    #[test]
    fn test_delete_timeout_is_clamped_by_remaining_budget() {
        let settings = ReconcilerSettings {
            lock_ttl: Duration::from_millis(5_000),
            storage_timeout: Duration::from_millis(10_000),
            ..ReconcilerSettings::default()
        };

        assert_eq!(settings.delete_timeout(Duration::from_millis(2_500)), Duration::from_millis(2_500));
        assert_eq!(settings.delete_timeout(Duration::ZERO), Duration::ZERO);
    }
}
