// crates/post/src/infrastructure/bootstrap/mod.rs

mod cache_reconciler;
mod reconciler_config;

pub use cache_reconciler::run_cache_reconciler;
pub use reconciler_config::ReconcilerConfig;
