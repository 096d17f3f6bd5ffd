// crates/post/src/infrastructure/bootstrap/reconciler_config.rs

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use shared_kernel::infrastructure::kafka::KafkaConfig;

use crate::application::reconcile_post_event::ReconcilerSettings;

/// Configuration du binaire de réconciliation (bus + object store + réglages).
#[derive(Debug, Clone)]
pub struct ReconcilerConfig {
    pub kafka: KafkaConfig,
    pub storage_root: PathBuf,
    pub storage_public_url: String,
    pub settings: ReconcilerSettings,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            kafka: KafkaConfig::default(),
            storage_root: PathBuf::from("./storage"),
            storage_public_url: "http://localhost:9000/posts".to_string(),
            settings: ReconcilerSettings::default(),
        }
    }
}

impl ReconcilerConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let mut settings = defaults.settings;

        if let Some(ms) = parse_var::<u64>("RECONCILER_LOCK_TTL_MS") {
            settings.lock_ttl = Duration::from_millis(ms);
        }
        if let Some(retries) = parse_var::<u32>("RECONCILER_LOCK_RETRIES") {
            settings.lock_retry.max_retries = retries;
        }
        if let Some(ms) = parse_var::<u64>("RECONCILER_STORAGE_TIMEOUT_MS") {
            settings.storage_timeout = Duration::from_millis(ms);
        }
        if let Some(secs) = parse_var::<u64>("POST_CACHE_TTL_SECS") {
            settings.cache_ttl = Duration::from_secs(secs);
        }
        if let Some(rebuild) = parse_var::<bool>("RECONCILER_REBUILD_LISTS_ON_DELETE") {
            settings.rebuild_lists_on_delete = rebuild;
        }

        if settings.storage_timeout > settings.cleanup_budget() {
            tracing::warn!(
                storage_timeout = ?settings.storage_timeout,
                lock_ttl = ?settings.lock_ttl,
                "Storage timeout exceeds half the lease TTL, deletes will be clamped"
            );
        }

        Self {
            kafka: KafkaConfig::from_env(),
            storage_root: env::var("POST_STORAGE_ROOT")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_root),
            storage_public_url: env::var("POST_STORAGE_PUBLIC_URL")
                .unwrap_or(defaults.storage_public_url),
            settings,
        }
    }

    pub fn with_storage(mut self, root: impl Into<PathBuf>, public_url: impl Into<String>) -> Self {
        self.storage_root = root.into();
        self.storage_public_url = public_url.into();
        self
    }

    pub fn with_settings(mut self, settings: ReconcilerSettings) -> Self {
        self.settings = settings;
        self
    }
}

/// Valeur absente ou illisible : on garde le défaut
fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    let raw = env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(var = name, value = %raw, "Ignoring unparsable variable");
            None
        }
    }
}
