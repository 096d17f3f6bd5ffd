// crates/shared-kernel/src/infrastructure/concurrency/singleflight.rs

//! # Singleflight - Déduplication de lectures concurrentes
//!
//! Garantit qu'une seule instance d'une opération asynchrone est en cours pour une clé donnée.
//! Sur un cache miss, 1000 lecteurs simultanés du même post ne déclenchent qu'une
//! seule lecture du store de référence :
//! 1. Le premier appelant (leader) exécute la lecture.
//! 2. Les suivants attendent le même résultat.
//! 3. Le résultat est distribué à tous puis la clé est libérée.

use dashmap::DashMap;
use futures::future::{FutureExt, Shared};
use std::future::Future;
use tokio::sync::oneshot;
use crate::errors::{DomainError, Result};

pub struct Singleflight<K, T> {
    requests: DashMap<K, Shared<oneshot::Receiver<Result<T>>>>,
}

impl<K, T> Default for Singleflight<K, T>
where
    K: std::hash::Hash + Eq + Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, T> Singleflight<K, T>
where
    K: std::hash::Hash + Eq + Clone + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            requests: DashMap::new(),
        }
    }

    pub async fn execute<F, Fut>(&self, key: K, factory: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        use dashmap::mapref::entry::Entry;

        // Check-and-Insert ATOMIQUE via Entry
        let shared_fut = match self.requests.entry(key.clone()) {
            Entry::Occupied(entry) => {
                // Un leader est déjà en cours, on récupère son futur partagé
                entry.get().clone()
            }
            Entry::Vacant(entry) => {
                // On est le leader
                let (tx, rx) = oneshot::channel();
                entry.insert(rx.shared());

                // Nettoyage garanti, même si le leader est annulé en plein vol
                let _cleanup = Cleanup { requests: &self.requests, key };

                // Le verrou DashMap est relâché avant le .await
                let result = factory().await;

                // On diffuse le résultat
                let _ = tx.send(result.clone());

                return result;
            }
        };

        // Suiveur : on attend le résultat du leader
        match shared_fut.await {
            Ok(result) => result,
            Err(_) => Err(DomainError::Internal(
                "Singleflight leader panicked or dropped".to_string(),
            )),
        }
    }
}

struct Cleanup<'a, K, T>
where
    K: std::hash::Hash + Eq,
{
    requests: &'a DashMap<K, Shared<oneshot::Receiver<Result<T>>>>,
    key: K,
}

impl<K, T> Drop for Cleanup<'_, K, T>
where
    K: std::hash::Hash + Eq,
{
    fn drop(&mut self) {
        self.requests.remove(&self.key);
    }
}
