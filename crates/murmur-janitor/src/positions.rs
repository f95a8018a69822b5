//! Position normalizer
//!
//! A channel that defines the position marker group wants its direct children
//! shown in default (alphabetical) order, so every child with a non-zero
//! position is reset to 0.

use crate::report::Operation;
use crate::{Janitor, JanitorError, JanitorEvent, Reporter};
use murmur_domain::{AclSnapshot, Channel, ChannelId, VirtualServer};
use std::collections::{BTreeMap, HashSet};

/// Whether the ACL snapshot defines the marker group
pub fn restricts_children(acl: &AclSnapshot, marker_group: &str) -> bool {
    acl.group(marker_group).is_some()
}

/// Direct children of `parents` whose position is not already the default
pub fn children_to_reset<'a>(
    channels: &'a BTreeMap<ChannelId, Channel>,
    parents: &HashSet<ChannelId>,
) -> Vec<&'a Channel> {
    channels
        .values()
        .filter(|c| c.parent.is_some_and(|p| parents.contains(&p)))
        .filter(|c| c.position != 0)
        .collect()
}

impl<R: Reporter> Janitor<R> {
    /// Reset child positions under every restricting parent
    ///
    /// Channels already at position 0 are not written back. A rejected
    /// update is reported and skipped.
    ///
    /// Returns the number of positions reset.
    pub fn normalize_positions<S: VirtualServer>(&mut self, server: &mut S) -> Result<usize, JanitorError> {
        let server_id = server.id();

        let channels = server
            .channels()
            .map_err(|e| JanitorError::server(server_id, e))?;

        let mut parents = HashSet::new();
        for channel in channels.values() {
            let acl = server
                .channel_acl(channel.id)
                .map_err(|e| JanitorError::server(server_id, e))?;
            if restricts_children(&acl, &self.config.position_marker_group) {
                self.emit(JanitorEvent::RestrictingParent {
                    server_id,
                    channel_id: channel.id,
                    name: channel.name.clone(),
                });
                parents.insert(channel.id);
            }
        }

        if parents.is_empty() {
            return Ok(0);
        }

        let channels = server
            .channels()
            .map_err(|e| JanitorError::server(server_id, e))?;

        let mut reset = 0;
        for channel in children_to_reset(&channels, &parents) {
            let updated = Channel {
                position: 0,
                ..channel.clone()
            };

            if !self.config.dry_run {
                if let Err(e) = server.set_channel_state(&updated) {
                    self.emit(JanitorEvent::MutationFailed {
                        server_id,
                        operation: Operation::SetChannelState,
                        entity_id: channel.id,
                        name: channel.name.clone(),
                        message: e.to_string(),
                    });
                    continue;
                }
            }

            self.emit(JanitorEvent::PositionReset {
                server_id,
                channel_id: channel.id,
                name: channel.name.clone(),
                previous: channel.position,
                dry_run: self.config.dry_run,
            });
            reset += 1;
        }

        Ok(reset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use murmur_domain::Group;

    fn tree(channels: Vec<Channel>) -> BTreeMap<ChannelId, Channel> {
        channels.into_iter().map(|c| (c.id, c)).collect()
    }

    #[test]
    fn test_restricts_children_ignores_membership() {
        let marker = AclSnapshot::with_groups(vec![Group::new("no_position_for_children", vec![])]);
        assert!(restricts_children(&marker, "no_position_for_children"));

        let other = AclSnapshot::with_groups(vec![Group::new("admin", vec![1])]);
        assert!(!restricts_children(&other, "no_position_for_children"));
    }

    #[test]
    fn test_children_to_reset_direct_children_only() {
        let channels = tree(vec![
            Channel::new(0, "Root", None),
            Channel::new(1, "Ranked", Some(0)).at_position(5),
            Channel::new(2, "Alpha", Some(1)).at_position(3),
            Channel::new(3, "Beta", Some(1)),
            Channel::new(4, "Nested", Some(2)).at_position(7),
            Channel::new(5, "Gamma", Some(1)).at_position(-2),
        ]);
        let parents: HashSet<ChannelId> = [1].into_iter().collect();

        let ids: Vec<ChannelId> = children_to_reset(&channels, &parents)
            .into_iter()
            .map(|c| c.id)
            .collect();

        // Beta is already 0, Nested is a grandchild, Ranked is the parent itself
        assert_eq!(ids, vec![2, 5]);
    }

    #[test]
    fn test_children_to_reset_without_parents() {
        let channels = tree(vec![
            Channel::new(0, "Root", None),
            Channel::new(1, "A", Some(0)).at_position(9),
        ]);
        assert!(children_to_reset(&channels, &HashSet::new()).is_empty());
    }
}
