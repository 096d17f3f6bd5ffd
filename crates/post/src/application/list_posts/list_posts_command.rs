// crates/post/src/application/list_posts/list_posts_command.rs

use serde::{Deserialize, Serialize};
use shared_kernel::domain::value_objects::UserId;
use shared_kernel::infrastructure::pagination::PageRequest;

/// `owner_id: None` = liste globale
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ListPostsCommand {
    pub owner_id: Option<UserId>,
    pub page: PageRequest,
}

impl ListPostsCommand {
    /// Entrées brutes de l'appelant, normalisées (`page >= 1`, `limit >= 1`)
    pub fn all(page: i64, limit: i64) -> Self {
        Self { owner_id: None, page: PageRequest::normalize(page, limit) }
    }

    pub fn by_owner(owner_id: UserId, page: i64, limit: i64) -> Self {
        Self { owner_id: Some(owner_id), page: PageRequest::normalize(page, limit) }
    }
}
