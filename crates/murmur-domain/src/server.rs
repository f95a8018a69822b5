//! Server module - instance identity and liveness

/// Identifier of a server instance within the cluster
pub type ServerId = i32;

/// Liveness snapshot of one instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerStatus {
    /// Whether the instance is currently running
    pub running: bool,
    /// Uptime in seconds (0 when stopped)
    pub uptime_secs: u64,
}

impl ServerStatus {
    /// A running instance with the given uptime
    pub fn running(uptime_secs: u64) -> Self {
        Self {
            running: true,
            uptime_secs,
        }
    }

    /// A stopped instance
    pub fn stopped() -> Self {
        Self {
            running: false,
            uptime_secs: 0,
        }
    }
}
