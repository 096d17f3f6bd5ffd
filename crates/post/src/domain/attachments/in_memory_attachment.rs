// crates/post/src/domain/attachments/in_memory_attachment.rs

use std::io::Cursor;
use async_trait::async_trait;
use shared_kernel::errors::{DomainError, Result};
use tokio::io::AsyncRead;

use crate::domain::attachments::{AttachmentSource, AttachmentStream};

/// Pièce jointe déjà en mémoire
#[derive(Debug, Clone)]
pub struct InMemoryAttachment {
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
    fail_open: bool,
    fail_close: bool,
}

impl InMemoryAttachment {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
            fail_open: false,
            fail_close: false,
        }
    }

    pub fn failing_open(mut self) -> Self {
        self.fail_open = true;
        self
    }

    pub fn failing_close(mut self) -> Self {
        self.fail_close = true;
        self
    }
}

#[async_trait]
impl AttachmentSource for InMemoryAttachment {
    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn content_type(&self) -> &str {
        &self.content_type
    }

    async fn open(&self) -> Result<Box<dyn AttachmentStream>> {
        if self.fail_open {
            return Err(DomainError::UploadFailed {
                reason: format!("cannot open '{}'", self.file_name),
            });
        }

        Ok(Box::new(InMemoryStream {
            file_name: self.file_name.clone(),
            cursor: Cursor::new(self.bytes.clone()),
            fail_close: self.fail_close,
        }))
    }
}

struct InMemoryStream {
    file_name: String,
    cursor: Cursor<Vec<u8>>,
    fail_close: bool,
}

#[async_trait]
impl AttachmentStream for InMemoryStream {
    fn reader(&mut self) -> &mut (dyn AsyncRead + Send + Unpin) {
        &mut self.cursor
    }

    async fn close(&mut self) -> Result<()> {
        if self.fail_close {
            return Err(DomainError::UploadFailed {
                reason: format!("cannot close '{}'", self.file_name),
            });
        }
        Ok(())
    }
}
