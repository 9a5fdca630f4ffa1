//! Opt-in `tracing` instrumentation, behind the `logging` feature
//! (default-off — the hot relaxation loop would be dominated by logging
//! overhead at target scale if this were unconditional).
//!
//! Instrumentation points: [`crate::Graph::from_edges`] logs a `debug!`
//! with node/edge counts; the all-pairs driver wraps its rayon fan-out in
//! an `info_span!` and logs one `debug!` per worker; [`crate::Network`]
//! logs `info!` timing lines around `preprocess`/`aggregate`.

use tracing_subscriber::EnvFilter;

/// Installs a `tracing-subscriber` fmt subscriber reading its filter from
/// `RUST_LOG` (falling back to `info`). Call once, near the start of
/// `main`; a second call is a no-op.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init();
}
