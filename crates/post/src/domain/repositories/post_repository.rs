// crates/post/src/domain/repositories/post_repository.rs

use async_trait::async_trait;
use shared_kernel::domain::value_objects::{PostId, UserId};
use shared_kernel::errors::Result;
use shared_kernel::infrastructure::pagination::PageRequest;

use crate::domain::entities::Post;

/// Filtre de listing. `owner_id: None` = liste globale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub owner_id: Option<UserId>,
}

impl PostFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_owner(owner_id: UserId) -> Self {
        Self { owner_id: Some(owner_id) }
    }
}

/// Store de référence. Les listes sont triées par date de création décroissante.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(&self, post: &Post) -> Result<()>;
    async fn fetch(&self, id: &PostId) -> Result<Option<Post>>;
    /// `NotFound` si la ligne n'existe plus
    async fn update(&self, post: &Post) -> Result<()>;
    /// `NotFound` si la ligne n'existe plus
    async fn delete(&self, id: &PostId) -> Result<()>;
    /// Retourne la page demandée et le total correspondant au filtre
    async fn list(&self, filter: &PostFilter, page: PageRequest) -> Result<(Vec<Post>, u64)>;
}
