// crates/post/tests/application/mod.rs

mod fixture;
mod post_lifecycle_it;
mod reconciler_it_for_concurrency;
mod service_it_for_cache_aside;
mod service_it_for_ownership;
