//! Reporting collaborator
//!
//! Maintenance steps never log directly; they emit [`JanitorEvent`]s into the
//! [`Reporter`] the [`Janitor`](crate::Janitor) was built with. The default
//! [`TracingReporter`] turns them into structured `tracing` events.

use crate::RetentionPolicy;
use chrono::NaiveDateTime;
use murmur_domain::{ChannelId, ServerId, UserId};

/// Mutation verb that was rejected by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `removeChannel`
    RemoveChannel,
    /// `setChannelState`
    SetChannelState,
}

impl Operation {
    /// Operation name as used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::RemoveChannel => "remove_channel",
            Operation::SetChannelState => "set_channel_state",
        }
    }
}

/// Something the janitor did or observed
#[derive(Debug, Clone, PartialEq)]
pub enum JanitorEvent {
    /// Discovery returned no instances
    NoServers,

    /// A running instance is about to be maintained
    ServerFound {
        /// Instance id
        server_id: ServerId,
        /// Uptime in seconds
        uptime_secs: u64,
    },

    /// Instance is not running and was skipped
    ServerSkipped {
        /// Instance id
        server_id: ServerId,
    },

    /// Instance maintenance stopped on an error
    ServerFailed {
        /// Instance id
        server_id: ServerId,
        /// Error text
        message: String,
    },

    /// A registration was (or in dry-run, would be) removed
    UserRemoved {
        /// Instance id
        server_id: ServerId,
        /// Registration id
        user_id: UserId,
        /// Display name
        name: String,
        /// Policy that classified it
        policy: RetentionPolicy,
        /// Parsed last activity, `None` if never recorded
        last_active: Option<NaiveDateTime>,
        /// No mutation was issued
        dry_run: bool,
    },

    /// A leaf channel without administrators was (or would be) removed
    ChannelRemoved {
        /// Instance id
        server_id: ServerId,
        /// Channel id
        channel_id: ChannelId,
        /// Channel name
        name: String,
        /// Pruning pass it was removed in (1-based)
        pass: usize,
        /// No mutation was issued
        dry_run: bool,
    },

    /// One pruning pass finished
    PrunePassCompleted {
        /// Instance id
        server_id: ServerId,
        /// Pass number (1-based)
        pass: usize,
        /// Channels removed in this pass
        removed: usize,
    },

    /// Channel defines the position marker group
    RestrictingParent {
        /// Instance id
        server_id: ServerId,
        /// Channel id
        channel_id: ChannelId,
        /// Channel name
        name: String,
    },

    /// A child channel's position was (or would be) reset to 0
    PositionReset {
        /// Instance id
        server_id: ServerId,
        /// Channel id
        channel_id: ChannelId,
        /// Channel name
        name: String,
        /// Position before the reset
        previous: i32,
        /// No mutation was issued
        dry_run: bool,
    },

    /// The server rejected an unregister; the user was skipped
    UserRemovalRejected {
        /// Instance id
        server_id: ServerId,
        /// Registration id
        user_id: UserId,
        /// Display name
        name: String,
        /// Policy that classified it
        policy: RetentionPolicy,
        /// Parsed last activity, `None` if never recorded
        last_active: Option<NaiveDateTime>,
        /// Error text
        message: String,
    },

    /// The server rejected a channel mutation; the channel was skipped
    MutationFailed {
        /// Instance id
        server_id: ServerId,
        /// Rejected verb
        operation: Operation,
        /// Channel id
        entity_id: ChannelId,
        /// Channel name
        name: String,
        /// Error text
        message: String,
    },
}

/// Sink for janitor events
pub trait Reporter {
    /// Record one event
    fn report(&mut self, event: &JanitorEvent);
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, event: &JanitorEvent) {
        (**self).report(event);
    }
}

/// Collects events in memory (useful for tests and summaries)
impl Reporter for Vec<JanitorEvent> {
    fn report(&mut self, event: &JanitorEvent) {
        self.push(event.clone());
    }
}

/// Reporter that emits structured `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&mut self, event: &JanitorEvent) {
        match event {
            JanitorEvent::NoServers => tracing::info!("No servers found"),
            JanitorEvent::ServerFound { server_id, uptime_secs } => tracing::info!(
                server_id,
                uptime = %format_uptime(*uptime_secs),
                "Found running server"
            ),
            JanitorEvent::ServerSkipped { server_id } => {
                tracing::info!(server_id, "Server is not running, skipping")
            }
            JanitorEvent::ServerFailed { server_id, message } => {
                tracing::error!(server_id, error = %message, "Server maintenance failed")
            }
            JanitorEvent::UserRemoved {
                server_id,
                user_id,
                name,
                policy,
                last_active,
                dry_run,
            } => {
                let last_active = format_last_active(*last_active);
                tracing::info!(
                    server_id,
                    user_id,
                    name = %name,
                    policy = %policy,
                    last_active = %last_active,
                    "{}Removing user #{} {} ({} policy, last activity at {})",
                    dry_run_prefix(*dry_run),
                    user_id,
                    name,
                    policy,
                    last_active
                );
            }
            JanitorEvent::ChannelRemoved {
                server_id,
                channel_id,
                name,
                pass,
                dry_run,
            } => tracing::info!(
                server_id,
                channel_id,
                name = %name,
                pass,
                "{}Removing channel #{} {}: no users in admin group",
                dry_run_prefix(*dry_run),
                channel_id,
                name
            ),
            JanitorEvent::PrunePassCompleted { server_id, pass, removed } => {
                tracing::debug!(server_id, pass, removed, "Pruning pass completed")
            }
            JanitorEvent::RestrictingParent { server_id, channel_id, name } => tracing::info!(
                server_id,
                channel_id,
                name = %name,
                "Channel #{} {} restricts positions for children",
                channel_id,
                name
            ),
            JanitorEvent::PositionReset {
                server_id,
                channel_id,
                name,
                previous,
                dry_run,
            } => tracing::info!(
                server_id,
                channel_id,
                name = %name,
                previous,
                "{}Resetting position for channel #{} {}",
                dry_run_prefix(*dry_run),
                channel_id,
                name
            ),
            JanitorEvent::UserRemovalRejected {
                server_id,
                user_id,
                name,
                policy,
                last_active,
                message,
            } => {
                let last_active = format_last_active(*last_active);
                tracing::warn!(
                    server_id,
                    user_id,
                    name = %name,
                    policy = %policy,
                    last_active = %last_active,
                    error = %message,
                    "Unregister of user #{} {} rejected ({} policy, last activity at {}), skipping",
                    user_id,
                    name,
                    policy,
                    last_active
                );
            }
            JanitorEvent::MutationFailed {
                server_id,
                operation,
                entity_id,
                name,
                message,
            } => tracing::warn!(
                server_id,
                operation = operation.as_str(),
                entity_id,
                name = %name,
                error = %message,
                "Mutation rejected, skipping"
            ),
        }
    }
}

fn format_last_active(last_active: Option<NaiveDateTime>) -> String {
    last_active
        .map(|at| at.to_string())
        .unwrap_or_else(|| "n/a".to_string())
}

fn dry_run_prefix(dry_run: bool) -> &'static str {
    if dry_run {
        "DRY RUN: "
    } else {
        ""
    }
}

/// Render an uptime as `[Nd ]HH:MM:SS`
pub fn format_uptime(secs: u64) -> String {
    let days = secs / 86_400;
    let rest = secs % 86_400;
    let clock = format!("{:02}:{:02}:{:02}", rest / 3600, (rest % 3600) / 60, rest % 60);
    if days > 0 {
        format!("{}d {}", days, clock)
    } else {
        clock
    }
}
