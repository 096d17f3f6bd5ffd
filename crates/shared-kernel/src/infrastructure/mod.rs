// crates/shared-kernel/src/infrastructure/mod.rs

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "kafka")]
pub mod kafka;

#[cfg(feature = "redis")]
pub mod redis;

#[cfg(feature = "concurrency")]
pub mod concurrency;

pub mod bootstrap;
pub mod pagination;
pub mod retry;
pub mod telemetry;
