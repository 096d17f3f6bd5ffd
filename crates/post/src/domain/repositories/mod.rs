mod file_storage;
mod file_storage_stub;
mod post_repository;
mod post_repository_stub;

pub use file_storage::FileStorage;
pub use file_storage_stub::FileStorageStub;
pub use post_repository::{PostFilter, PostRepository};
pub use post_repository_stub::PostRepositoryStub;
