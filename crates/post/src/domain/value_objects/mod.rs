mod attachment_kind;
mod file_group;

pub use attachment_kind::AttachmentKind;
pub use file_group::FileGroup;
