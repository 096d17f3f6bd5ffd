mod update_post_command;
mod update_post_use_case;

pub use update_post_command::UpdatePostCommand;
pub use update_post_use_case::UpdatePostUseCase;
