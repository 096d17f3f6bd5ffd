// crates/shared-kernel/src/infrastructure/telemetry.rs

use tracing_subscriber::EnvFilter;

/// Installe le subscriber global. `RUST_LOG` prime, sinon `info`.
/// Les logs émis via la façade `log` (adaptateurs Kafka) sont relayés.
pub fn init_tracing(service_name: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(service = service_name, "📡 Tracing initialized");
    }
}
