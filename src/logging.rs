use std::io;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Default filter directives for a given verbosity
pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "talent_match=debug,warn"
    } else {
        "warn"
    }
}

/// Install the global subscriber. Logs go to stderr so stdout stays
/// clean for table/TSV/JSON output. `RUST_LOG` overrides the defaults.
pub fn configure_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    let stderr_log = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_filter(filter);

    // A second init (tests, embedding) is harmless
    let _ = tracing_subscriber::registry().with(stderr_log).try_init();
}
