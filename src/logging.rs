//! Logging setup for the application.
//!
//! Installs a global tracing subscriber filtered by `RUST_LOG`, defaulting
//! to `info`. Subsequent calls are no-ops so tests can call this freely.

use tracing_subscriber::EnvFilter;

pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
