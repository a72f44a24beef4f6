//! `tracing` subscriber setup for the binaries.

use tracing_subscriber::EnvFilter;

use crate::error::ConfigError;

/// Environment variable that overrides the configured log filter.
pub const LOG_ENV: &str = "PINYIN_LOG";

/// Initialize the global tracing subscriber with stderr output.
///
/// Call once at startup; later calls keep the first subscriber. `level` is
/// any `EnvFilter` directive and is ignored when `PINYIN_LOG` is set. A
/// malformed directive from either source is an error.
pub fn init_subscriber(level: &str) -> Result<(), ConfigError> {
    let directives = std::env::var(LOG_ENV).unwrap_or_else(|_| level.to_string());
    let filter = parse_filter(&directives)?;

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact();

    let _ = subscriber.try_init();
    Ok(())
}

/// Parses `EnvFilter` directives such as `warn` or `pinyin_core=debug`.
pub fn parse_filter(directives: &str) -> Result<EnvFilter, ConfigError> {
    EnvFilter::try_new(directives).map_err(|e| ConfigError::InvalidLogFilter {
        filter: directives.to_string(),
        reason: e.to_string(),
    })
}
