// crates/post/src/application/views/post_view.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_kernel::application::ToDto;
use shared_kernel::domain::entities::Entity;
use shared_kernel::domain::value_objects::{PostId, UserId};
use shared_kernel::infrastructure::pagination::PageResponse;

use crate::domain::entities::Post;
use crate::domain::value_objects::FileGroup;

/// Vue publique d'un post : c'est aussi la valeur stockée sous `post:<id>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostView {
    pub id: PostId,
    pub owner_id: UserId,
    pub content: String,
    pub media: Vec<FileGroup>,
    pub files: Vec<FileGroup>,
    pub like_count: u64,
    pub repost_count: u64,
    pub comment_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Valeur stockée sous `posts:list_page_*` et `posts:user_*_page_*`
pub type PaginatedPostsView = PageResponse<PostView>;

impl ToDto<PostView> for Post {
    fn to_dto(&self) -> PostView {
        PostView {
            id: *self.id(),
            owner_id: *self.owner_id(),
            content: self.content().to_string(),
            media: self.media().to_vec(),
            files: self.files().to_vec(),
            like_count: self.like_count().into(),
            repost_count: self.repost_count().into(),
            comment_count: self.comment_count().into(),
            created_at: self.created_at(),
            updated_at: self.updated_at(),
        }
    }
}

impl From<&Post> for PostView {
    fn from(post: &Post) -> Self {
        post.to_dto()
    }
}
