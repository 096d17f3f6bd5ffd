// crates/post/src/application/create_post/create_post_command.rs

use std::sync::Arc;
use shared_kernel::domain::value_objects::UserId;
use crate::domain::attachments::AttachmentSource;

#[derive(Clone)]
pub struct CreatePostCommand {
    pub owner_id: UserId,
    pub content: String,
    pub media: Vec<Arc<dyn AttachmentSource>>,
    pub files: Vec<Arc<dyn AttachmentSource>>,
}
