mod cache_reconciler_worker;

pub use cache_reconciler_worker::CacheReconcilerWorker;
