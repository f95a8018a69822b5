//! Error types for the management client.

use thiserror::Error;

/// Management channel errors
#[derive(Debug, Error)]
pub enum RpcError {
    /// Connection error (network, DNS, timeout, rejected handle)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Non-success status from the management bridge
    #[error("HTTP {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, if any
        message: String,
    },

    /// Requested user, channel or server does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Response body did not match the expected shape
    #[error("Decode error: {0}")]
    Decode(String),

    /// Endpoint URL could not be parsed
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Shared secret cannot be sent as a header value
    #[error("Invalid secret: {0}")]
    InvalidSecret(String),
}

impl From<reqwest::Error> for RpcError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            RpcError::Connection(e.to_string())
        } else if e.is_decode() {
            RpcError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            RpcError::Status {
                status: status.as_u16(),
                message: e.to_string(),
            }
        } else {
            RpcError::Connection(e.to_string())
        }
    }
}

impl From<serde_json::Error> for RpcError {
    fn from(e: serde_json::Error) -> Self {
        RpcError::Decode(format!("JSON parsing error: {}", e))
    }
}
