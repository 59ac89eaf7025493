//! Structured logging configuration.
//!
//! One subscriber for the whole process. `RUST_LOG` wins over the
//! configured level so operators can raise verbosity without touching
//! configuration.

use crate::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Safe to call more than once; later
/// calls are no-ops (tests initialize logging per-process).
pub fn init(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
