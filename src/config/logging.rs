//! Logging setup
//!
//! Diagnostics go to stderr through `tracing`. The filter comes from
//! `FARMBOOK_LOG` (same syntax as `RUST_LOG`) and defaults to warnings only,
//! so regular command output on stdout stays clean.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "FARMBOOK_LOG";

/// Install the global subscriber. Calling it twice is harmless.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
