// crates/post/src/application/get_post_by_id/get_post_by_id_command.rs

use serde::{Deserialize, Serialize};
use shared_kernel::domain::value_objects::PostId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetPostByIdCommand {
    pub post_id: PostId,
}
