// crates/post/src/infrastructure/storage/local_file_storage.rs

use std::io::ErrorKind;
use std::path::PathBuf;
use async_trait::async_trait;
use shared_kernel::domain::value_objects::Url;
use shared_kernel::errors::{DomainError, Result};
use tokio::fs;
use tokio::io::{AsyncRead, AsyncWriteExt};
use uuid::Uuid;

use crate::domain::repositories::FileStorage;

/// Object store sur disque : clé `<uuid-v7>-<nom nettoyé>` sous `root`,
/// URL publique `<public_base>/<clé>`.
pub struct LocalFileStorage {
    root: PathBuf,
    public_base: String,
}

impl LocalFileStorage {
    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base: public_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// Crée le dossier racine si besoin
    pub async fn ensure_root(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await.map_err(|e| {
            DomainError::Internal(format!("cannot create storage root {}: {e}", self.root.display()))
        })
    }

    fn sanitize(name: &str) -> String {
        let cleaned: String = name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
            .collect();
        let cleaned = cleaned.trim_start_matches('.');

        if cleaned.is_empty() {
            "file".to_string()
        } else {
            cleaned.to_string()
        }
    }

    /// `None` si l'URL n'a pas été émise par ce store
    fn key_of<'a>(&self, url: &'a Url) -> Option<&'a str> {
        let key = url
            .as_str()
            .strip_prefix(self.public_base.as_str())?
            .strip_prefix('/')?;

        let valid = !key.is_empty() && !key.contains('/') && !key.starts_with('.');
        valid.then_some(key)
    }
}

/// Supprime le fichier temporaire au drop, sauf après `persisted`.
/// Couvre aussi l'annulation du futur (timeout de l'uploader).
struct TempFile {
    path: PathBuf,
    armed: bool,
}

impl TempFile {
    fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn persisted(&mut self) {
        self.armed = false;
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path = %self.path.display(), error = %e, "file_storage: temp file left behind"),
        }
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn upload(
        &self,
        reader: &mut (dyn AsyncRead + Send + Unpin),
        name: &str,
        content_type: &str,
    ) -> Result<Url> {
        let key = format!("{}-{}", Uuid::now_v7(), Self::sanitize(name));
        let url = Url::try_new(format!("{}/{key}", self.public_base))
            .map_err(|e| DomainError::UploadFailed { reason: format!("invalid public url: {e}") })?;

        let upload_err = |e: std::io::Error| DomainError::UploadFailed { reason: format!("{key}: {e}") };

        fs::create_dir_all(&self.root).await.map_err(upload_err)?;

        // Écriture atomique : fichier temporaire puis rename
        let full_path = self.root.join(&key);
        let mut temp = TempFile::new(self.root.join(format!(".{key}.tmp")));

        let mut file = fs::File::create(temp.path()).await.map_err(upload_err)?;
        let written = tokio::io::copy(reader, &mut file).await.map_err(upload_err)?;
        file.sync_all().await.map_err(upload_err)?;
        file.shutdown().await.map_err(upload_err)?;
        drop(file);

        fs::rename(temp.path(), &full_path).await.map_err(upload_err)?;
        temp.persisted();

        tracing::debug!(key = %key, size = written, content_type, "file_storage: object written");
        Ok(url)
    }

    async fn delete(&self, url: &Url) -> Result<()> {
        let Some(key) = self.key_of(url) else {
            tracing::debug!(url = %url, "file_storage: foreign url, nothing to delete");
            return Ok(());
        };

        match fs::remove_file(self.root.join(key)).await {
            Ok(()) => Ok(()),
            // Déjà supprimé : succès
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DomainError::Internal(format!("cannot delete {key}: {e}"))),
        }
    }
}
