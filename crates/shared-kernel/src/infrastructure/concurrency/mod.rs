// crates/shared-kernel/src/infrastructure/concurrency/mod.rs

mod mutation_lock;
mod singleflight;

pub use mutation_lock::{Lease, MutationLock};
pub use singleflight::Singleflight;
