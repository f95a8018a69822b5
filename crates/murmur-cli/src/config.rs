//! Configuration file handling.
//!
//! Every section is optional; a missing file means the built-in defaults,
//! which are the production retention policy against a local bridge.

use crate::error::{CliError, Result};
use murmur_janitor::JanitorConfig;
use murmur_rpc::ConnectOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Management channel settings
    pub connection: ConnectionConfig,

    /// Logging settings
    pub logging: LoggingConfig,

    /// Retention policy
    pub janitor: JanitorConfig,
}

/// Management channel settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Bridge URL
    pub endpoint: String,

    /// Shared secret
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level or filter directive; `RUST_LOG` takes precedence
    pub level: String,

    /// Output format
    pub format: LogFormat,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line human-readable output
    Pretty,
    /// Single-line human-readable output
    Compact,
    /// One JSON object per line
    Json,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:6502".to_string(),
            secret: None,
            timeout_secs: 30,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if given, otherwise use defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<()> {
        if self.connection.endpoint.is_empty() {
            return Err(CliError::Config("connection.endpoint must not be empty".into()));
        }
        if self.connection.timeout_secs == 0 {
            return Err(CliError::Config("connection.timeout_secs must be greater than zero".into()));
        }
        self.janitor.validate()?;
        Ok(())
    }

    /// Options for [`murmur_rpc::MetaClient::connect`].
    pub fn connect_options(&self) -> ConnectOptions {
        ConnectOptions {
            timeout: Duration::from_secs(self.connection.timeout_secs),
            secret: self.connection.secret.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.connection.endpoint, "http://127.0.0.1:6502");
        assert_eq!(config.connection.timeout_secs, 30);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Compact);
        assert_eq!(config.janitor, JanitorConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_without_path_uses_defaults() {
        assert_eq!(AppConfig::load(None).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_parse_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            [connection]
            endpoint = "http://10.0.0.5:6502"
            secret = "s3cret"
            timeout_secs = 5

            [logging]
            level = "debug"
            format = "json"

            [janitor]
            inactive_days = 180
            dry_run = true
            "#
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.connection.endpoint, "http://10.0.0.5:6502");
        assert_eq!(config.connection.secret.as_deref(), Some("s3cret"));
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.janitor.inactive_days, 180);
        assert!(config.janitor.dry_run);
        assert_eq!(config.janitor.bad_name_grace_hours, 24);

        let options = config.connect_options();
        assert_eq!(options.timeout, Duration::from_secs(5));
        assert_eq!(options.secret.as_deref(), Some("s3cret"));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[janitor]\ninactive_days = 0\n").unwrap();
        assert!(matches!(AppConfig::from_file(file.path()), Err(CliError::Janitor(_))));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[connection]\ntimeout_secs = 0\n").unwrap();
        assert!(matches!(AppConfig::from_file(file.path()), Err(CliError::Config(_))));
    }

    #[test]
    fn test_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[connection\nendpoint = ").unwrap();
        assert!(matches!(AppConfig::from_file(file.path()), Err(CliError::Toml(_))));

        let missing = AppConfig::from_file("/nonexistent/murmur-janitor.toml");
        assert!(matches!(missing, Err(CliError::Io(_))));
    }
}
