mod attachment_uploader;

pub use attachment_uploader::AttachmentUploader;
