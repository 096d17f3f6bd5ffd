mod create_post_command;
mod create_post_use_case;

pub use create_post_command::CreatePostCommand;
pub use create_post_use_case::CreatePostUseCase;
