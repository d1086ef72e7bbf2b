//! Structured logging initialization via `tracing`.

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber from config values.
///
/// `format` selects the output shape ("json" for machine-readable lines,
/// anything else for human-readable output). `level` is the default filter
/// directive; the `RUST_LOG` environment variable still takes precedence.
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing_config(format: &str, level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if format == "json" {
        let _ = builder.json().try_init();
    } else {
        let _ = builder.try_init();
    }
}
