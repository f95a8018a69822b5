//! Channel module - nodes of the per-instance channel tree

use std::collections::{BTreeMap, HashSet};

/// Identifier of a channel, unique per instance
pub type ChannelId = i32;

/// The permanent root channel; never removable
pub const ROOT_CHANNEL_ID: ChannelId = 0;

/// Channel state as exchanged with the management channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    /// Channel id
    pub id: ChannelId,

    /// Display name
    pub name: String,

    /// Parent channel; `None` only for the root
    pub parent: Option<ChannelId>,

    /// Ephemeral channel created by a live session
    pub temporary: bool,

    /// Client-side display ordering (default 0)
    pub position: i32,

    /// Linked channels
    pub links: Vec<ChannelId>,

    /// Channel description; written back unchanged on state updates
    pub description: String,
}

impl Channel {
    /// Create a permanent channel at the default position
    pub fn new(id: ChannelId, name: impl Into<String>, parent: Option<ChannelId>) -> Self {
        Self {
            id,
            name: name.into(),
            parent,
            temporary: false,
            position: 0,
            links: Vec::new(),
            description: String::new(),
        }
    }

    /// Mark the channel as temporary
    pub fn temporary(mut self) -> Self {
        self.temporary = true;
        self
    }

    /// Set the display position
    pub fn at_position(mut self, position: i32) -> Self {
        self.position = position;
        self
    }

    /// Whether this is the root channel
    pub fn is_root(&self) -> bool {
        self.id == ROOT_CHANNEL_ID
    }
}

/// Ids of every channel that is currently some other channel's parent
pub fn occupied_parents(channels: &BTreeMap<ChannelId, Channel>) -> HashSet<ChannelId> {
    channels.values().filter_map(|c| c.parent).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occupied_parents() {
        let mut channels = BTreeMap::new();
        channels.insert(0, Channel::new(0, "Root", None));
        channels.insert(1, Channel::new(1, "Lobby", Some(0)));
        channels.insert(2, Channel::new(2, "Games", Some(1)));
        channels.insert(3, Channel::new(3, "Music", Some(0)));

        let parents = occupied_parents(&channels);
        assert_eq!(parents.len(), 2);
        assert!(parents.contains(&0));
        assert!(parents.contains(&1));
        assert!(!parents.contains(&2));
    }

    #[test]
    fn test_builders() {
        let channel = Channel::new(4, "AFK", Some(0)).temporary().at_position(3);
        assert!(channel.temporary);
        assert_eq!(channel.position, 3);
        assert!(!channel.is_root());
        assert!(Channel::new(ROOT_CHANNEL_ID, "Root", None).is_root());
    }
}
