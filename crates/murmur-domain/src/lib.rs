//! Murmur Domain Layer
//!
//! Read-only model of one voice-chat server instance as the janitor sees it,
//! plus the trait interfaces through which the management channel is reached.
//! The crate has no external dependencies; transports live in other crates.
//!
//! ## Key Concepts
//!
//! - **Instance**: one independently managed server in the cluster
//! - **Registration**: a persistent user account on an instance
//! - **Channel**: a node in the channel tree rooted at id 0
//! - **ACL snapshot**: per-channel access list plus named groups
//!
//! ## Architecture
//!
//! All entities are owned by the remote server. The janitor only reads
//! snapshots through [`traits::VirtualServer`] and issues delete/update verbs
//! back through the same trait.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod acl;
pub mod channel;
pub mod server;
pub mod traits;
pub mod user;

// Re-exports for convenience
pub use acl::{AclEntry, AclSnapshot, Group};
pub use channel::{Channel, ChannelId, ROOT_CHANNEL_ID};
pub use server::{ServerId, ServerStatus};
pub use traits::{MetaServer, VirtualServer};
pub use user::{UserId, UserRecord};
