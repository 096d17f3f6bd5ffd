// crates/post/src/domain/mod.rs

pub mod attachments;
pub mod entities;
pub mod events;
pub mod repositories;
pub mod value_objects;
