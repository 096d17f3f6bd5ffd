// crates/post/src/domain/attachments/attachment.rs

use async_trait::async_trait;
use shared_kernel::errors::Result;
use tokio::io::AsyncRead;

use crate::domain::value_objects::AttachmentKind;

/// Fichier nommé fourni par l'appelant (multipart, fichier local, mémoire).
#[async_trait]
pub trait AttachmentSource: Send + Sync {
    fn file_name(&self) -> &str;

    fn content_type(&self) -> &str;

    /// Classification par extension
    fn kind(&self) -> AttachmentKind {
        AttachmentKind::from_filename(self.file_name())
    }

    async fn open(&self) -> Result<Box<dyn AttachmentStream>>;
}

/// Flux ouvert. `close` est toujours appelé, même après un upload raté.
#[async_trait]
pub trait AttachmentStream: Send {
    fn reader(&mut self) -> &mut (dyn AsyncRead + Send + Unpin);

    async fn close(&mut self) -> Result<()>;
}
