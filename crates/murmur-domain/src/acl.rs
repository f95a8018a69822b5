//! ACL module - access lists and named groups attached to a channel

use crate::user::UserId;

/// One access-control entry
///
/// Carried through unchanged; the janitor never interprets permissions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AclEntry {
    /// Entry applies to this channel
    pub apply_here: bool,
    /// Entry applies to sub-channels
    pub apply_subs: bool,
    /// Entry was inherited from a parent
    pub inherited: bool,
    /// Target user id, `-1` when the entry targets a group
    pub user_id: UserId,
    /// Target group name, when not targeting a user
    pub group: Option<String>,
    /// Allowed permission bits
    pub allow: u32,
    /// Denied permission bits
    pub deny: u32,
}

/// Named channel group
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Group {
    /// Group name
    pub name: String,
    /// Group was inherited from a parent
    pub inherited: bool,
    /// Group is inherited by sub-channels
    pub inherit: bool,
    /// Group can be inherited
    pub inheritable: bool,
    /// Users explicitly added on this channel
    pub add: Vec<UserId>,
    /// Users explicitly removed on this channel
    pub remove: Vec<UserId>,
    /// Effective members including inheritance
    pub members: Vec<UserId>,
}

impl Group {
    /// Create a group with the given explicit additions
    pub fn new(name: impl Into<String>, add: Vec<UserId>) -> Self {
        Self {
            name: name.into(),
            add,
            ..Default::default()
        }
    }
}

/// ACL and groups of one channel, as returned by a single ACL fetch
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AclSnapshot {
    /// Access-control entries
    pub acls: Vec<AclEntry>,
    /// Named groups defined on the channel
    pub groups: Vec<Group>,
    /// Whether the channel inherits ACLs from its parent
    pub inherit: bool,
}

impl AclSnapshot {
    /// Snapshot carrying only groups
    pub fn with_groups(groups: Vec<Group>) -> Self {
        Self {
            groups,
            inherit: true,
            ..Default::default()
        }
    }

    /// First group with exactly this name
    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.name == name)
    }
}
