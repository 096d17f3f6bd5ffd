// crates/post/src/application/upload_attachments/attachment_uploader.rs

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use shared_kernel::domain::value_objects::Url;
use shared_kernel::errors::{DomainError, Result};

use crate::domain::attachments::AttachmentSource;
use crate::domain::repositories::FileStorage;
use crate::domain::value_objects::{AttachmentKind, FileGroup};

/// Classe les pièces jointes par extension et les pousse vers l'object store.
/// Un lot est tout ou rien : le premier échec fait échouer l'appel.
/// Ne supprime jamais rien, le nettoyage appartient au réconciliateur.
#[derive(Clone)]
pub struct AttachmentUploader {
    storage: Arc<dyn FileStorage>,
    timeout: Duration,
}

impl AttachmentUploader {
    pub fn new(storage: Arc<dyn FileStorage>, timeout: Duration) -> Self {
        Self { storage, timeout }
    }

    /// Groupes triés par type (image, video, file). Liste vide = aucun groupe.
    pub async fn upload_all(&self, sources: &[Arc<dyn AttachmentSource>]) -> Result<Vec<FileGroup>> {
        let mut groups: BTreeMap<AttachmentKind, Vec<Url>> = BTreeMap::new();

        for source in sources {
            let url = self.upload_one(source.as_ref()).await.map_err(|e| {
                tracing::warn!(
                    file = source.file_name(),
                    uploaded = groups.values().map(Vec::len).sum::<usize>(),
                    error = %e,
                    "❌ Attachment batch aborted"
                );
                e
            })?;

            groups.entry(source.kind()).or_default().push(url);
        }

        Ok(groups
            .into_iter()
            .map(|(kind, urls)| FileGroup::new(kind, urls))
            .collect())
    }

    /// Pousse médias et fichiers en parallèle. Les deux lots vont toujours à leur
    /// terme, chaque flux ouvert est donc refermé même si l'autre lot échoue.
    pub async fn upload_groups(
        &self,
        media: &[Arc<dyn AttachmentSource>],
        files: &[Arc<dyn AttachmentSource>],
    ) -> Result<(Vec<FileGroup>, Vec<FileGroup>)> {
        let (media, files) = tokio::join!(self.upload_all(media), self.upload_all(files));

        match (media, files) {
            (Ok(media), Ok(files)) => Ok((media, files)),
            (Err(e), Ok(done)) | (Ok(done), Err(e)) => {
                let abandoned: Vec<&Url> = done.iter().flat_map(|g| g.urls.iter()).collect();
                if !abandoned.is_empty() {
                    // Orphelins sans événement : aucun post ne les référence
                    tracing::warn!(count = abandoned.len(), urls = ?abandoned, "⚠️ Uploaded attachments abandoned");
                }
                Err(e)
            }
            (Err(e), Err(other)) => {
                tracing::warn!(error = %other, "Both attachment batches failed");
                Err(e)
            }
        }
    }

    async fn upload_one(&self, source: &dyn AttachmentSource) -> Result<Url> {
        let name = source.file_name();
        let mut stream = source.open().await?;

        let uploaded = match tokio::time::timeout(
            self.timeout,
            self.storage.upload(stream.reader(), name, source.content_type()),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(DomainError::UploadFailed {
                reason: format!("upload of '{name}' timed out after {:?}", self.timeout),
            }),
        };

        // Le close est tenté dans tous les cas
        let closed = stream.close().await;

        match (uploaded, closed) {
            (Ok(url), Ok(())) => {
                tracing::debug!(file = name, url = %url, "📎 Attachment uploaded");
                Ok(url)
            }
            (Ok(url), Err(close_err)) => {
                tracing::warn!(file = name, url = %url, error = %close_err, "Attachment uploaded but close failed");
                Err(close_err)
            }
            (Err(upload_err), Err(close_err)) => {
                tracing::warn!(file = name, error = %close_err, "Close failed after upload error");
                Err(upload_err)
            }
            (Err(upload_err), Ok(())) => Err(upload_err),
        }
    }
}
