// crates/post/src/application/delete_post/delete_post_command.rs

use serde::{Deserialize, Serialize};
use shared_kernel::domain::value_objects::{PostId, UserId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletePostCommand {
    pub post_id: PostId,
    pub owner_id: UserId,
}
