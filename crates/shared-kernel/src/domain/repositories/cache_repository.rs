// crates/shared-kernel/src/domain/repositories/cache_repository.rs

use crate::errors::AppResult;
use async_trait::async_trait;
use std::time::Duration;

/// Port du cache-aside. Les valeurs sont opaques : l'appelant possède la (dé)sérialisation.
#[async_trait]
pub trait CacheRepository: Send + Sync {
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> AppResult<()>;
    async fn get(&self, key: &str) -> AppResult<Option<String>>;
    async fn delete(&self, key: &str) -> AppResult<()>;
    async fn exists(&self, key: &str) -> AppResult<bool>;

    /// Supprime toutes les clés correspondant au glob (`posts:list_page_*`)
    async fn invalidate_pattern(&self, pattern: &str) -> AppResult<()>;

    /// SET NX PX atomique. `true` si la clé a été posée.
    async fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool>;

    /// Compare-and-delete : supprime la clé seulement si elle vaut `expected`.
    async fn delete_if_equals(&self, key: &str, expected: &str) -> AppResult<bool>;
}
