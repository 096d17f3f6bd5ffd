// crates/post/src/infrastructure/mod.rs

pub mod bootstrap;
pub mod postgres;
pub mod storage;
