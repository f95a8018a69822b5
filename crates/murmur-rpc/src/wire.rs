//! JSON shapes exchanged with the management bridge and their conversions.

use murmur_domain::{AclEntry, AclSnapshot, Channel, ChannelId, Group, ServerId, ServerStatus, UserId, UserRecord};
use serde::{Deserialize, Serialize};

/// Bridge version (`GET /meta/version`)
#[derive(Debug, Clone, Deserialize)]
pub struct VersionInfo {
    /// Major version
    pub major: i32,
    /// Minor version
    pub minor: i32,
    /// Patch version
    pub patch: i32,
    /// Release string
    #[serde(default)]
    pub release: String,
}

/// Instance status (`GET /servers/{id}`)
#[derive(Debug, Clone, Deserialize)]
pub struct ServerInfo {
    /// Instance id
    pub id: ServerId,
    /// Whether the instance is running
    pub running: bool,
    /// Uptime in seconds
    #[serde(default)]
    pub uptime: u64,
}

impl From<ServerInfo> for ServerStatus {
    fn from(info: ServerInfo) -> Self {
        ServerStatus {
            running: info.running,
            uptime_secs: if info.running { info.uptime } else { 0 },
        }
    }
}

/// Registration record (`GET /servers/{id}/registrations/{uid}`)
///
/// Unknown fields (email, comment, certificate hash) are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
    /// Display name
    pub name: String,
    /// Last activity, `YYYY-MM-DD HH:MM:SS`
    #[serde(default)]
    pub last_active: Option<String>,
}

impl Registration {
    /// Attach the id the record was fetched under
    pub fn into_record(self, id: UserId) -> UserRecord {
        UserRecord {
            id,
            name: self.name,
            last_active: self.last_active,
        }
    }
}

/// Channel state (`GET /servers/{id}/channels`, `PUT /servers/{id}/channels/{cid}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelState {
    /// Channel id
    pub id: ChannelId,
    /// Channel name
    pub name: String,
    /// Parent id, `-1` for the root
    #[serde(default = "no_parent")]
    pub parent: ChannelId,
    /// Linked channels
    #[serde(default)]
    pub links: Vec<ChannelId>,
    /// Description
    #[serde(default)]
    pub description: String,
    /// Temporary channel
    #[serde(default)]
    pub temporary: bool,
    /// Display position
    #[serde(default)]
    pub position: i32,
}

fn no_parent() -> ChannelId {
    -1
}

impl From<ChannelState> for Channel {
    fn from(state: ChannelState) -> Self {
        Channel {
            id: state.id,
            name: state.name,
            parent: (state.parent >= 0).then_some(state.parent),
            temporary: state.temporary,
            position: state.position,
            links: state.links,
            description: state.description,
        }
    }
}

impl From<&Channel> for ChannelState {
    fn from(channel: &Channel) -> Self {
        ChannelState {
            id: channel.id,
            name: channel.name.clone(),
            parent: channel.parent.unwrap_or(-1),
            links: channel.links.clone(),
            description: channel.description.clone(),
            temporary: channel.temporary,
            position: channel.position,
        }
    }
}

/// One ACL entry
#[derive(Debug, Clone, Deserialize)]
pub struct AclRule {
    #[serde(default)]
    apply_here: bool,
    #[serde(default)]
    apply_subs: bool,
    #[serde(default)]
    inherited: bool,
    #[serde(default = "no_user")]
    userid: UserId,
    #[serde(default)]
    group: Option<String>,
    #[serde(default)]
    allow: u32,
    #[serde(default)]
    deny: u32,
}

fn no_user() -> UserId {
    -1
}

/// One channel group
#[derive(Debug, Clone, Deserialize)]
pub struct GroupState {
    name: String,
    #[serde(default)]
    inherited: bool,
    #[serde(default)]
    inherit: bool,
    #[serde(default)]
    inheritable: bool,
    #[serde(default)]
    add: Vec<UserId>,
    #[serde(default)]
    remove: Vec<UserId>,
    #[serde(default)]
    members: Vec<UserId>,
}

/// ACL response (`GET /servers/{id}/channels/{cid}/acl`)
#[derive(Debug, Clone, Deserialize)]
pub struct AclResponse {
    #[serde(default)]
    acls: Vec<AclRule>,
    #[serde(default)]
    groups: Vec<GroupState>,
    #[serde(default)]
    inherit: bool,
}

impl From<AclResponse> for AclSnapshot {
    fn from(response: AclResponse) -> Self {
        AclSnapshot {
            acls: response
                .acls
                .into_iter()
                .map(|a| AclEntry {
                    apply_here: a.apply_here,
                    apply_subs: a.apply_subs,
                    inherited: a.inherited,
                    user_id: a.userid,
                    group: a.group,
                    allow: a.allow,
                    deny: a.deny,
                })
                .collect(),
            groups: response
                .groups
                .into_iter()
                .map(|g| Group {
                    name: g.name,
                    inherited: g.inherited,
                    inherit: g.inherit,
                    inheritable: g.inheritable,
                    add: g.add,
                    remove: g.remove,
                    members: g.members,
                })
                .collect(),
            inherit: response.inherit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_channel_map_parsing() {
        let json = r#"{
            "0": {"id": 0, "name": "Root", "parent": -1, "links": [], "description": "", "temporary": false, "position": 0},
            "4": {"id": 4, "name": "Lobby", "parent": 0, "position": 3},
            "9": {"id": 9, "name": "Match", "parent": 4, "temporary": true}
        }"#;

        let states: BTreeMap<ChannelId, ChannelState> = serde_json::from_str(json).unwrap();
        let channels: BTreeMap<ChannelId, Channel> =
            states.into_iter().map(|(id, s)| (id, s.into())).collect();

        assert_eq!(channels.len(), 3);
        assert_eq!(channels[&0].parent, None);
        assert_eq!(channels[&4].parent, Some(0));
        assert_eq!(channels[&4].position, 3);
        assert!(channels[&9].temporary);
    }

    #[test]
    fn test_channel_state_keeps_unmodelled_fields() {
        let mut channel = Channel::new(5, "Ranked", Some(0)).at_position(2);
        channel.description = "Top teams only".to_string();
        channel.links = vec![6, 7];

        let state = ChannelState::from(&channel);
        assert_eq!(state.parent, 0);

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["description"], "Top teams only");
        assert_eq!(json["links"], serde_json::json!([6, 7]));

        let root = ChannelState::from(&Channel::new(0, "Root", None));
        assert_eq!(root.parent, -1);
    }

    #[test]
    fn test_registration_parsing() {
        let json = r#"{"name": "Mumla_User", "email": "x@example.org", "last_active": "2024-05-01 08:30:00"}"#;
        let user = serde_json::from_str::<Registration>(json).unwrap().into_record(12);
        assert_eq!(user.id, 12);
        assert_eq!(user.last_active(), Some("2024-05-01 08:30:00"));

        let json = r#"{"name": "newbie"}"#;
        let user = serde_json::from_str::<Registration>(json).unwrap().into_record(13);
        assert!(user.last_active().is_none());
    }

    #[test]
    fn test_acl_parsing() {
        let json = r#"{
            "acls": [{"apply_here": true, "apply_subs": true, "group": "admin", "allow": 1, "deny": 0}],
            "groups": [
                {"name": "admin", "inherit": true, "inheritable": true, "add": [42], "members": [42, 7]},
                {"name": "no_position_for_children"}
            ],
            "inherit": true
        }"#;

        let acl: AclSnapshot = serde_json::from_str::<AclResponse>(json).unwrap().into();
        assert_eq!(acl.acls.len(), 1);
        assert_eq!(acl.acls[0].user_id, -1);
        assert_eq!(acl.group("admin").map(|g| g.add.clone()), Some(vec![42]));
        assert!(acl.group("no_position_for_children").is_some());
        assert!(acl.inherit);
    }

    #[test]
    fn test_stopped_server_reports_no_uptime() {
        let info: ServerInfo = serde_json::from_str(r#"{"id": 2, "running": false, "uptime": 99}"#).unwrap();
        let status = ServerStatus::from(info);
        assert!(!status.running);
        assert_eq!(status.uptime_secs, 0);
    }
}
