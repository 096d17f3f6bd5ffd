mod post_view;

pub use post_view::{PaginatedPostsView, PostView};
