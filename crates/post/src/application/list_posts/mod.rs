mod list_posts_command;
mod list_posts_use_case;

pub use list_posts_command::ListPostsCommand;
pub use list_posts_use_case::ListPostsUseCase;
pub(crate) use list_posts_use_case::load_page;
