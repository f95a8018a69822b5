//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Logging could not be initialised
    #[error("Logging error: {0}")]
    Logging(String),

    /// Management channel error
    #[error(transparent)]
    Rpc(#[from] murmur_rpc::RpcError),

    /// Maintenance run error
    #[error(transparent)]
    Janitor(#[from] murmur_janitor::JanitorError),
}
