// crates/post/src/domain/repositories/file_storage_stub.rs

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use async_trait::async_trait;
use shared_kernel::domain::value_objects::Url;
use shared_kernel::errors::{DomainError, Result};
use tokio::io::{AsyncRead, AsyncReadExt};
use uuid::Uuid;

use crate::domain::repositories::FileStorage;

pub const STUB_PUBLIC_BASE: &str = "https://objects.test/posts";

/// Object store en mémoire
#[derive(Default)]
pub struct FileStorageStub {
    objects: Mutex<HashMap<Url, Vec<u8>>>,
    deleted: Mutex<Vec<Url>>,
    /// Noms de fichiers dont l'upload échoue
    pub failing_names: Mutex<HashSet<String>>,
    /// URLs dont la suppression échoue
    pub failing_deletes: Mutex<HashSet<Url>>,
    pub fail_all_deletes: AtomicBool,
    /// Latence simulée des suppressions
    pub delete_delay: Mutex<Option<Duration>>,
    pub upload_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
}

impl FileStorageStub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_upload_of(&self, name: &str) {
        self.failing_names.lock().unwrap().insert(name.to_string());
    }

    pub fn fail_delete_of(&self, url: &Url) {
        self.failing_deletes.lock().unwrap().insert(url.clone());
    }

    pub fn with_delete_delay(self, delay: Duration) -> Self {
        *self.delete_delay.lock().unwrap() = Some(delay);
        self
    }

    /// Dépose un objet directement (état initial d'un test)
    pub fn seed(&self, name: &str) -> Url {
        let url = Url::new_unchecked(format!("{STUB_PUBLIC_BASE}/{}-{name}", Uuid::now_v7()));
        self.objects.lock().unwrap().insert(url.clone(), Vec::new());
        url
    }

    pub fn contains(&self, url: &Url) -> bool {
        self.objects.lock().unwrap().contains_key(url)
    }

    pub fn object(&self, url: &Url) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(url).cloned()
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// URLs effectivement supprimées, dans l'ordre
    pub fn deleted(&self) -> Vec<Url> {
        self.deleted.lock().unwrap().clone()
    }

    pub fn upload_calls(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FileStorage for FileStorageStub {
    async fn upload(
        &self,
        reader: &mut (dyn AsyncRead + Send + Unpin),
        name: &str,
        _content_type: &str,
    ) -> Result<Url> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);

        if self.failing_names.lock().unwrap().contains(name) {
            return Err(DomainError::UploadFailed {
                reason: format!("object store rejected '{name}'"),
            });
        }

        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .await
            .map_err(|e| DomainError::UploadFailed { reason: e.to_string() })?;

        let url = Url::new_unchecked(format!("{STUB_PUBLIC_BASE}/{}-{name}", Uuid::now_v7()));
        self.objects.lock().unwrap().insert(url.clone(), bytes);
        Ok(url)
    }

    async fn delete(&self, url: &Url) -> Result<()> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);

        let delay = *self.delete_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_all_deletes.load(Ordering::SeqCst)
            || self.failing_deletes.lock().unwrap().contains(url)
        {
            return Err(DomainError::Internal(format!("object store refused to delete {url}")));
        }

        // Absent = déjà supprimé
        if self.objects.lock().unwrap().remove(url).is_some() {
            self.deleted.lock().unwrap().push(url.clone());
        }
        Ok(())
    }
}
