// crates/post/src/domain/attachments/stalled_attachment.rs

use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use async_trait::async_trait;
use shared_kernel::errors::Result;
use tokio::io::{AsyncRead, ReadBuf};

use crate::domain::attachments::{AttachmentSource, AttachmentStream};

/// Pièce jointe dont le flux ne rend jamais d'octet. Note le `close`.
#[derive(Debug, Clone, Default)]
pub struct StalledAttachment {
    file_name: String,
    closed: Arc<AtomicBool>,
}

impl StalledAttachment {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self { file_name: file_name.into(), closed: Arc::default() }
    }

    pub fn was_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AttachmentSource for StalledAttachment {
    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn content_type(&self) -> &str {
        "application/octet-stream"
    }

    async fn open(&self) -> Result<Box<dyn AttachmentStream>> {
        Ok(Box::new(StalledStream { reader: Stalled, closed: self.closed.clone() }))
    }
}

struct Stalled;

impl AsyncRead for Stalled {
    fn poll_read(self: Pin<&mut Self>, _: &mut Context<'_>, _: &mut ReadBuf<'_>) -> Poll<std::io::Result<()>> {
        Poll::Pending
    }
}

struct StalledStream {
    reader: Stalled,
    closed: Arc<AtomicBool>,
}

#[async_trait]
impl AttachmentStream for StalledStream {
    fn reader(&mut self) -> &mut (dyn AsyncRead + Send + Unpin) {
        &mut self.reader
    }

    async fn close(&mut self) -> Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}
