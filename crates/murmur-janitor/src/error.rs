//! Error types for Janitor operations

use murmur_domain::{ServerId, UserId};
use thiserror::Error;

/// Errors that can occur during Janitor operations
///
/// Rejected mutations are not errors: they are reported and skipped.
#[derive(Error, Debug)]
pub enum JanitorError {
    /// Management handle unusable; the run cannot continue
    #[error("Connection error: {0}")]
    Connection(String),

    /// A read call against one instance failed
    #[error("Server {server_id} error: {message}")]
    Server {
        /// Instance the call was issued against
        server_id: ServerId,
        /// Transport error text
        message: String,
    },

    /// Last-activity timestamp not in `YYYY-MM-DD HH:MM:SS` form
    #[error("User #{user_id} has malformed last activity {value:?}: {source}")]
    TimestampFormat {
        /// Offending registration
        user_id: UserId,
        /// Raw value received
        value: String,
        /// Parser error
        #[source]
        source: chrono::ParseError,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// One or more instances failed after all were attempted
    #[error("Maintenance failed on {} server(s): {failed:?}", .failed.len())]
    ServersFailed {
        /// Ids of the failed instances
        failed: Vec<ServerId>,
    },
}

impl JanitorError {
    /// Wrap a transport error raised by a read against `server_id`
    pub(crate) fn server(server_id: ServerId, err: impl std::fmt::Display) -> Self {
        JanitorError::Server {
            server_id,
            message: err.to_string(),
        }
    }
}
