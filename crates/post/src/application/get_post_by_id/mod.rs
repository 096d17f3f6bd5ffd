mod get_post_by_id_command;
mod get_post_by_id_use_case;

pub use get_post_by_id_command::GetPostByIdCommand;
pub use get_post_by_id_use_case::GetPostByIdUseCase;
