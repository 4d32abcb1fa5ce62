//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_LEVEL: &str = "warn";

/// Pick the log filter: the command-line level, then `RUST_LOG`, then the
/// config file, then the default.
fn filter(flag: Option<&str>, file: Option<&str>) -> EnvFilter {
    let directive = match (flag, std::env::var(EnvFilter::DEFAULT_ENV).ok()) {
        (Some(level), _) => level.to_string(),
        (None, Some(env)) => env,
        (None, None) => file.unwrap_or(DEFAULT_LEVEL).to_string(),
    };
    EnvFilter::try_new(&directive).unwrap_or_else(|e| {
        eprintln!(
            "Invalid log level '{}': {}. Falling back to '{}'",
            directive, e, DEFAULT_LEVEL
        );
        EnvFilter::new(DEFAULT_LEVEL)
    })
}

/// Install a fmt subscriber writing to stderr, leaving stdout for JSON.
pub fn init(flag: Option<&str>, file: Option<&str>) {
    // Ignore the error if a subscriber is already set.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(flag, file))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
