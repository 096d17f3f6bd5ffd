// crates/post/src/domain/attachments/mod.rs

mod attachment;
mod in_memory_attachment;
mod local_file_attachment;
#[cfg(test)]
mod stalled_attachment;

pub use attachment::{AttachmentSource, AttachmentStream};
pub use in_memory_attachment::InMemoryAttachment;
pub use local_file_attachment::LocalFileAttachment;
#[cfg(test)]
pub use stalled_attachment::StalledAttachment;
