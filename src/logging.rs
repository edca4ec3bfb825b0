use std::io;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Filter from a `RUST_LOG`-style string; unset, blank or invalid falls back to `info`.
pub fn env_filter(raw: Option<&str>) -> EnvFilter {
    raw.map(str::trim)
        .filter(|r| !r.is_empty())
        .and_then(|r| EnvFilter::try_new(r).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the stderr fmt subscriber for every binary. Safe to call more than once.
pub fn init_logging() {
    let raw = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(raw.as_deref()))
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
