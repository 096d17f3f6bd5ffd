// crates/shared-kernel/src/domain/value_objects/mod.rs

mod counter;
mod post_id;
mod url;
mod user_id;
mod value_object;

pub use counter::Counter;
pub use post_id::PostId;
pub use url::Url;
pub use user_id::UserId;
pub use value_object::ValueObject;
