//! Tracing subscriber setup.

use crate::config::{LogFormat, LoggingConfig};
use crate::error::{CliError, Result};
use tracing_subscriber::EnvFilter;

/// Build the event filter: `RUST_LOG` if set, otherwise the configured level.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(&config.level)
        .map_err(|e| CliError::Config(format!("invalid log level {:?}: {}", config.level, e)))
}

/// Install the global subscriber. Output goes to stderr.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(config)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = match config.format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| CliError::Logging(e.to_string()))
}
