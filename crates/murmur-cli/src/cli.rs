//! Command-line argument parsing.

use crate::config::{AppConfig, LogFormat};
use clap::Parser;
use std::path::PathBuf;

/// Murmur janitor - one maintenance pass over every server instance.
#[derive(Debug, Parser)]
#[command(name = "murmur-janitor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "MURMUR_JANITOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Management bridge URL
    #[arg(short, long, env = "MURMUR_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Shared management secret
    #[arg(long, env = "MURMUR_SECRET", hide_env_values = true)]
    pub secret: Option<String>,

    /// Report what would be removed or reset without changing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Log level or filter directive (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormatArg>,
}

/// Log format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogFormatArg {
    /// Multi-line output
    Pretty,
    /// Single-line output (default)
    Compact,
    /// JSON lines
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

impl Cli {
    /// Apply command-line overrides on top of the file configuration.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(endpoint) = &self.endpoint {
            config.connection.endpoint = endpoint.clone();
        }
        if let Some(secret) = &self.secret {
            config.connection.secret = Some(secret.clone());
        }
        if self.dry_run {
            config.janitor.dry_run = true;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = self.log_format {
            config.logging.format = format.into();
        }
    }
}
