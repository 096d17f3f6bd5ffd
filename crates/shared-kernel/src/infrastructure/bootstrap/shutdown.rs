// crates/shared-kernel/src/infrastructure/bootstrap/shutdown.rs

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Annule `token` au premier Ctrl-C. Les workers terminent leur message en cours.
pub fn cancel_on_ctrl_c(token: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            _ = token.cancelled() => {}
            signal = tokio::signal::ctrl_c() => {
                match signal {
                    Ok(()) => log::warn!("🛑 Shutdown signal received, stopping workers..."),
                    Err(e) => log::error!("Unable to listen for shutdown signal: {}", e),
                }
                token.cancel();
            }
        }
    })
}
