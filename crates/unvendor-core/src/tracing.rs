//! Tracing subscriber setup.
//!
//! Log output goes to stderr so stdout stays reserved for reports and
//! generated scripts. The filter is read from `UNVENDOR_LOG` and falls back
//! to the level passed by the caller.

use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive string.
pub const LOG_ENV_VAR: &str = "UNVENDOR_LOG";

static INITIALIZED: OnceLock<()> = OnceLock::new();

/// Install the global subscriber. Subsequent calls are no-ops.
pub fn init_tracing(default_level: &str) {
    INITIALIZED.get_or_init(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(default_level));

        // try_init fails if another subscriber is already installed (e.g. by a test harness).
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}

/// Map a `-v` count to a default filter level.
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}
