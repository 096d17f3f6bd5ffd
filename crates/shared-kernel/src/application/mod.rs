// crates/shared-kernel/src/application/mod.rs

pub mod ports;

mod dto;

pub use dto::ToDto;
