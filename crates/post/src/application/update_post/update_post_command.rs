// crates/post/src/application/update_post/update_post_command.rs

use std::sync::Arc;
use shared_kernel::domain::value_objects::{PostId, UserId};
use crate::domain::attachments::AttachmentSource;

/// Remplacement complet : `media` / `files` vides vident la collection correspondante.
#[derive(Clone)]
pub struct UpdatePostCommand {
    pub post_id: PostId,
    pub owner_id: UserId,
    pub content: String,
    pub media: Vec<Arc<dyn AttachmentSource>>,
    pub files: Vec<Arc<dyn AttachmentSource>>,
}
