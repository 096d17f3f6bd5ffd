mod delete_post_command;
mod delete_post_use_case;

pub use delete_post_command::DeletePostCommand;
pub use delete_post_use_case::DeletePostUseCase;

#[cfg(test)]
mod delete_post_use_case_test;
