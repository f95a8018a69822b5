//! Channel topology pruner
//!
//! Removes permanent leaf channels whose admin group has no explicit members,
//! pass after pass, until a full pass removes nothing. Each pass works from a
//! fresh channel listing: removing a leaf may turn its parent into a leaf, but
//! only the next pass gets to see that.

use crate::report::Operation;
use crate::{Janitor, JanitorError, JanitorEvent, Reporter};
use murmur_domain::channel::occupied_parents;
use murmur_domain::{AclSnapshot, Channel, ChannelId, VirtualServer};
use std::collections::BTreeMap;

/// Channels eligible for an admin check in this pass
///
/// Excludes the root, temporary channels and every channel that is some
/// other channel's parent.
pub fn leaf_candidates(channels: &BTreeMap<ChannelId, Channel>) -> Vec<&Channel> {
    let parents = occupied_parents(channels);
    channels
        .values()
        .filter(|c| !c.is_root() && !c.temporary && !parents.contains(&c.id))
        .collect()
}

/// Whether the channel's `admin_group` has at least one explicitly added member
pub fn is_administered(acl: &AclSnapshot, admin_group: &str) -> bool {
    acl.group(admin_group).is_some_and(|g| !g.add.is_empty())
}

impl<R: Reporter> Janitor<R> {
    /// Prune unadministered leaf channels until the tree stops changing
    ///
    /// Returns the number of channels removed across all passes.
    pub fn prune_channels<S: VirtualServer>(&mut self, server: &mut S) -> Result<usize, JanitorError> {
        let server_id = server.id();
        let dry_run = self.config.dry_run;

        let mut snapshot = server
            .channels()
            .map_err(|e| JanitorError::server(server_id, e))?;
        let mut total = 0;
        let mut pass = 0;

        loop {
            pass += 1;
            let mut removed: Vec<ChannelId> = Vec::new();

            for channel in leaf_candidates(&snapshot) {
                let acl = server
                    .channel_acl(channel.id)
                    .map_err(|e| JanitorError::server(server_id, e))?;
                if is_administered(&acl, &self.config.admin_group) {
                    continue;
                }

                if !dry_run {
                    if let Err(e) = server.remove_channel(channel.id) {
                        self.emit(JanitorEvent::MutationFailed {
                            server_id,
                            operation: Operation::RemoveChannel,
                            entity_id: channel.id,
                            name: channel.name.clone(),
                            message: e.to_string(),
                        });
                        continue;
                    }
                }

                self.emit(JanitorEvent::ChannelRemoved {
                    server_id,
                    channel_id: channel.id,
                    name: channel.name.clone(),
                    pass,
                    dry_run,
                });
                removed.push(channel.id);
            }

            self.emit(JanitorEvent::PrunePassCompleted {
                server_id,
                pass,
                removed: removed.len(),
            });

            if removed.is_empty() {
                break;
            }
            total += removed.len();

            if dry_run {
                // Nothing was deleted remotely; replay the removals locally
                for id in &removed {
                    snapshot.remove(id);
                }
            } else {
                snapshot = server
                    .channels()
                    .map_err(|e| JanitorError::server(server_id, e))?;
            }
        }

        Ok(total)
    }
}
