// backend/services/post/cache-reconciler/src/main.rs

use post::infrastructure::bootstrap::run_cache_reconciler;
use shared_kernel::errors::AppResult;

#[tokio::main]
async fn main() -> AppResult<()> {
    run_cache_reconciler("Post").await
}
