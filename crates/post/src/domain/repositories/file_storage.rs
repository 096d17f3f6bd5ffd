// crates/post/src/domain/repositories/file_storage.rs

use async_trait::async_trait;
use shared_kernel::domain::value_objects::Url;
use shared_kernel::errors::Result;
use tokio::io::AsyncRead;

/// Object store des pièces jointes.
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Pousse les octets sous une clé attribuée par le backend et retourne une URL stable.
    async fn upload(
        &self,
        reader: &mut (dyn AsyncRead + Send + Unpin),
        name: &str,
        content_type: &str,
    ) -> Result<Url>;

    /// Idempotent : un objet déjà absent est un succès.
    async fn delete(&self, url: &Url) -> Result<()>;
}
