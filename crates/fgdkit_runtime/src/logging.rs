//! Tracing subscriber setup for the `fgdkit` binary.
//!
//! Library crates only emit events; installing a subscriber is left to the
//! binary so embedders keep control of their own logging.

use tracing_subscriber::EnvFilter;

/// The filter used when `RUST_LOG` is unset.
#[must_use]
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose { "fgdkit=debug,info" } else { "warn" }
}

/// Installs a stderr subscriber honouring `RUST_LOG`.
///
/// Does nothing if a global subscriber is already set.
pub fn setup_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .try_init();
}
