// crates/shared-kernel/src/domain/mod.rs

pub mod entities;
pub mod events;
mod identifier;
pub mod repositories;
pub mod value_objects;

pub use identifier::Identifier;
