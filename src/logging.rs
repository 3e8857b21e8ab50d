//! Diagnostic logging
//!
//! Logs go to stderr so command output on stdout stays clean for piping.
//! `BUDGET_TRACKER_LOG` takes an `EnvFilter` directive and overrides the
//! level picked from `-v` flags.

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding an `EnvFilter` directive
pub const LOG_ENV: &str = "BUDGET_TRACKER_LOG";

static TRACING_INIT: Once = Once::new();

/// Level for the crate's own events given the number of `-v` flags
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the global tracing subscriber. Later calls are no-ops.
pub fn init_tracing(verbosity: u8) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
            EnvFilter::new(format!("budget_tracker={}", level_for_verbosity(verbosity)))
        });

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    });
}
