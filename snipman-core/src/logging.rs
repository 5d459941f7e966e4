//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

/// Builds the filter: `RUST_LOG` wins, then `verbose`, then `default_level`
#[must_use]
pub fn env_filter(default_level: &str, verbose: bool) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = if verbose { "debug" } else { default_level };
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Initializes logging to stderr
///
/// Safe to call more than once; later calls are ignored.
pub fn init(default_level: &str, verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level, verbose))
        .with_writer(std::io::stderr)
        .try_init();
}
