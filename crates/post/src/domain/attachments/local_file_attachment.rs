// crates/post/src/domain/attachments/local_file_attachment.rs

use std::path::PathBuf;
use async_trait::async_trait;
use shared_kernel::errors::{DomainError, Result};
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncWriteExt};

use crate::domain::attachments::{AttachmentSource, AttachmentStream};

/// Pièce jointe lue depuis le disque (spool d'un upload multipart)
#[derive(Debug, Clone)]
pub struct LocalFileAttachment {
    path: PathBuf,
    file_name: String,
    content_type: String,
}

impl LocalFileAttachment {
    pub fn new(path: impl Into<PathBuf>, content_type: impl Into<String>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self { path, file_name, content_type: content_type.into() }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }
}

#[async_trait]
impl AttachmentSource for LocalFileAttachment {
    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn content_type(&self) -> &str {
        &self.content_type
    }

    async fn open(&self) -> Result<Box<dyn AttachmentStream>> {
        let file = File::open(&self.path).await.map_err(|e| DomainError::UploadFailed {
            reason: format!("cannot open {}: {e}", self.path.display()),
        })?;

        Ok(Box::new(LocalFileStream { file }))
    }
}

struct LocalFileStream {
    file: File,
}

#[async_trait]
impl AttachmentStream for LocalFileStream {
    fn reader(&mut self) -> &mut (dyn AsyncRead + Send + Unpin) {
        &mut self.file
    }

    async fn close(&mut self) -> Result<()> {
        self.file
            .shutdown()
            .await
            .map_err(|e| DomainError::UploadFailed { reason: format!("cannot close file: {e}") })
    }
}
