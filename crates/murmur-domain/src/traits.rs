//! Trait definitions for the management channel
//!
//! These traits define the boundary between the janitor and whatever transport
//! reaches the servers. Implementations live in other crates (murmur-rpc) or
//! in tests.

use std::collections::BTreeMap;

use crate::{AclSnapshot, Channel, ChannelId, ServerId, ServerStatus, UserId, UserRecord};

/// Entry point of the management channel: discovers server instances
///
/// Implemented by the transport layer (murmur-rpc)
pub trait MetaServer {
    /// Handle type for one instance
    type Server: VirtualServer;

    /// Error type for discovery
    type Error: std::fmt::Display;

    /// Enumerate every configured instance, running or not
    fn servers(&self) -> Result<Vec<Self::Server>, Self::Error>;

    /// Verify the handle still answers
    fn check(&self) -> Result<(), Self::Error>;
}

/// Administrative verbs against one server instance
///
/// Every call is a blocking remote call; nothing is cached between calls.
pub trait VirtualServer {
    /// Error type for instance operations
    type Error: std::fmt::Display;

    /// Instance id
    fn id(&self) -> ServerId;

    /// Whether the instance is running, and for how long
    fn status(&self) -> Result<ServerStatus, Self::Error>;

    /// Ids of registered users whose name matches `filter` (empty = all)
    fn registered_user_ids(&self, filter: &str) -> Result<Vec<UserId>, Self::Error>;

    /// Full registration record of a user
    fn registration(&self, user_id: UserId) -> Result<UserRecord, Self::Error>;

    /// Delete a registration; fails if the id no longer exists
    fn unregister_user(&mut self, user_id: UserId) -> Result<(), Self::Error>;

    /// Current channel tree keyed by channel id
    fn channels(&self) -> Result<BTreeMap<ChannelId, Channel>, Self::Error>;

    /// ACL and groups of one channel
    fn channel_acl(&self, channel_id: ChannelId) -> Result<AclSnapshot, Self::Error>;

    /// Remove a channel; fails if it still has children or no longer exists
    fn remove_channel(&mut self, channel_id: ChannelId) -> Result<(), Self::Error>;

    /// Persist mutated channel fields
    fn set_channel_state(&mut self, channel: &Channel) -> Result<(), Self::Error>;
}
