//! Murmur janitor command-line front end.
//!
//! Loads the configuration, installs logging, connects to the management
//! bridge and runs the janitor exactly once. Scheduling is left to cron or
//! a systemd timer.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;

pub use cli::Cli;
pub use config::AppConfig;
pub use error::{CliError, Result};

use murmur_janitor::{Janitor, JanitorMetrics};
use murmur_rpc::MetaClient;

/// Resolve the effective configuration from the file and flags.
pub fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    cli.apply(&mut config);
    config.validate()?;
    Ok(config)
}

/// Run one maintenance pass with an already-resolved configuration.
pub fn run(config: AppConfig) -> Result<JanitorMetrics> {
    tracing::info!(
        endpoint = %config.connection.endpoint,
        dry_run = config.janitor.dry_run,
        "Starting maintenance run"
    );

    let meta = MetaClient::connect(&config.connection.endpoint, config.connect_options())?;
    tracing::info!(version = meta.version(), "Connected to management bridge");

    let mut janitor = Janitor::new(config.janitor);
    let outcome = janitor.run(&meta);
    tracing::info!("{}", janitor.metrics().summary());
    Ok(outcome?)
}
