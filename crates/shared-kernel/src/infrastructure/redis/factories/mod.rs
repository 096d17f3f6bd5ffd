// crates/shared-kernel/src/infrastructure/redis/factories/mod.rs

mod redis_config;
mod redis_context;
mod redis_context_builder;

pub use redis_config::RedisConfig;
pub use redis_context::RedisContext;
pub use redis_context_builder::RedisContextBuilder;
