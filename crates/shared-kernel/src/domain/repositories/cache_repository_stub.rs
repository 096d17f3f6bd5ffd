// crates/shared-kernel/src/domain/repositories/cache_repository_stub.rs

use crate::domain::repositories::CacheRepository;
use crate::errors::{AppError, AppResult, ErrorCode};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |deadline| deadline > now)
    }
}

/// Cache en mémoire respectant les TTL, utilisé par les tests de use cases.
#[derive(Default)]
pub struct CacheRepositoryStub {
    storage: Mutex<HashMap<String, Entry>>,
    pub fail_all: AtomicBool,
    pub get_calls: AtomicUsize,
    pub set_calls: AtomicUsize,
}

impl CacheRepositoryStub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail_all.store(failing, Ordering::SeqCst);
    }

    /// Écriture directe sans TTL (état initial d'un test)
    pub fn seed(&self, key: &str, value: &str) {
        self.storage.lock().unwrap().insert(
            key.to_string(),
            Entry { value: value.to_string(), expires_at: None },
        );
    }

    /// Lecture directe sans passer par le port (assertions de test)
    pub fn peek(&self, key: &str) -> Option<String> {
        let now = Instant::now();
        self.storage
            .lock()
            .unwrap()
            .get(key)
            .filter(|e| e.is_live(now))
            .map(|e| e.value.clone())
    }

    pub fn keys(&self) -> Vec<String> {
        let now = Instant::now();
        let mut keys: Vec<String> = self
            .storage
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, e)| e.is_live(now))
            .map(|(k, _)| k.clone())
            .collect();
        keys.sort();
        keys
    }

    fn check(&self) -> AppResult<()> {
        if self.fail_all.load(Ordering::SeqCst) {
            return Err(AppError::new(ErrorCode::InternalError, "Cache Down"));
        }
        Ok(())
    }
}

#[async_trait]
impl CacheRepository for CacheRepositoryStub {
    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> AppResult<()> {
        self.check()?;
        self.set_calls.fetch_add(1, Ordering::SeqCst);
        self.storage.lock().unwrap().insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: ttl.map(|t| Instant::now() + t),
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.check()?;
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.peek(key))
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.check()?;
        self.storage.lock().unwrap().remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        self.check()?;
        Ok(self.peek(key).is_some())
    }

    async fn invalidate_pattern(&self, pattern: &str) -> AppResult<()> {
        self.check()?;
        // Simulation simple du pattern Redis '*' par un prefix match
        let prefix = pattern.replace('*', "");
        self.storage
            .lock()
            .unwrap()
            .retain(|key, _| !key.starts_with(&prefix));
        Ok(())
    }

    async fn set_if_absent(&self, key: &str, value: &str, ttl: Duration) -> AppResult<bool> {
        self.check()?;
        let now = Instant::now();
        let mut map = self.storage.lock().unwrap();

        if map.get(key).is_some_and(|e| e.is_live(now)) {
            return Ok(false);
        }

        map.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Some(now + ttl),
            },
        );
        Ok(true)
    }

    async fn delete_if_equals(&self, key: &str, expected: &str) -> AppResult<bool> {
        self.check()?;
        let now = Instant::now();
        let mut map = self.storage.lock().unwrap();

        let matches = map
            .get(key)
            .is_some_and(|e| e.is_live(now) && e.value == expected);
        if matches {
            map.remove(key);
        }
        Ok(matches)
    }
}
