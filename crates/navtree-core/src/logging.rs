#![forbid(unsafe_code)]

//! Structured logging support.
//!
//! With the `tracing` feature the `tracing` macros are re-exported here (and
//! at the crate root) so downstream crates share one import path. The
//! `tracing-json` feature adds a JSON subscriber for production hosts.
//!
//! Without the features this module is empty and logging compiles away.

#[cfg(feature = "tracing")]
pub use tracing::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};

/// Environment variable consulted for the log filter.
#[cfg(feature = "tracing-json")]
pub const LOG_FILTER_ENV: &str = "NAVTREE_LOG";

/// Install a global JSON subscriber filtered by `NAVTREE_LOG` (default `info`).
///
/// Returns `false` if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init_json_logging() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(false)
        .try_init()
        .is_ok()
}
