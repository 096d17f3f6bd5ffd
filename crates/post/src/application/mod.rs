// crates/post/src/application/mod.rs

pub mod cache_keys;
pub mod create_post;
pub mod delete_post;
pub mod get_post_by_id;
pub mod list_posts;
pub mod reconcile_post_event;
pub mod update_post;
pub mod upload_attachments;
pub mod views;
pub mod workers;

mod event_publisher;
mod post_service;

pub use post_service::{PostService, PostServiceConfig};
