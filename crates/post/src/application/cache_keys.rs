// crates/post/src/application/cache_keys.rs

//! Conventions de nommage des clés Redis du contexte post.

use shared_kernel::domain::value_objects::{PostId, UserId};
use shared_kernel::infrastructure::pagination::PageRequest;

/// Lease global des reconstructions de listes
pub const GLOBAL_UPDATE_LOCK: &str = "cache:update_lock";

/// Toutes les pages de la liste globale
pub const LIST_PAGES_PATTERN: &str = "posts:list_page_*";

pub fn post(id: &PostId) -> String {
    format!("post:{id}")
}

pub fn list_page(page: PageRequest) -> String {
    format!("posts:list_page_{}_limit_{}", page.page, page.limit)
}

pub fn user_page(owner_id: &UserId, page: PageRequest) -> String {
    format!("posts:user_{owner_id}_page_{}_limit_{}", page.page, page.limit)
}

pub fn user_pages_pattern(owner_id: &UserId) -> String {
    format!("posts:user_{owner_id}_page_*")
}

/// Lease par post : deux posts différents se réconcilient en parallèle
pub fn post_lock(id: &PostId) -> String {
    format!("{GLOBAL_UPDATE_LOCK}:post:{id}")
}
