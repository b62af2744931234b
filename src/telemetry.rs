use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
///
/// `RUST_LOG` is honoured; without it this crate logs at `info`. Safe to call
/// repeatedly, and a subscriber installed elsewhere is left in place.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("finance_projection=info"));

        if fmt().with_env_filter(filter).try_init().is_ok() {
            tracing::info!("finance_projection tracing initialized");
        }
    });
}
