//! In-memory cluster implementing the management traits

#![allow(dead_code)]

use chrono::{Duration, NaiveDateTime};
use murmur_domain::{
    AclSnapshot, Channel, ChannelId, Group, MetaServer, ServerId, ServerStatus, UserId,
    UserRecord, VirtualServer,
};
use murmur_janitor::{parse_last_active, LAST_ACTIVE_FORMAT};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::rc::Rc;

/// Fixed "now" used by every test janitor
pub fn fixed_now() -> NaiveDateTime {
    parse_last_active("2024-06-15 12:00:00").unwrap()
}

/// Timestamp `ago` before [`fixed_now`], in wire format
pub fn ago(ago: Duration) -> String {
    (fixed_now() - ago).format(LAST_ACTIVE_FORMAT).to_string()
}

#[derive(Debug, Default)]
pub struct ServerState {
    pub status: Option<ServerStatus>,
    pub users: BTreeMap<UserId, UserRecord>,
    pub channels: BTreeMap<ChannelId, Channel>,
    pub acls: HashMap<ChannelId, AclSnapshot>,
    pub reject_unregister: HashSet<UserId>,
    pub reject_remove: HashSet<ChannelId>,
    pub reject_set: HashSet<ChannelId>,
    pub fail_channel_listing: bool,
    pub channel_fetches: usize,
    pub removed_channels: Vec<ChannelId>,
    pub unregistered: Vec<UserId>,
    pub state_writes: Vec<Channel>,
}

/// Handle to one fake instance; clones share state
#[derive(Debug, Clone)]
pub struct FakeServer {
    id: ServerId,
    pub state: Rc<RefCell<ServerState>>,
}

impl FakeServer {
    /// Running instance containing only the root channel
    pub fn new(id: ServerId) -> Self {
        let mut state = ServerState {
            status: Some(ServerStatus::running(3_600)),
            ..Default::default()
        };
        state.channels.insert(0, Channel::new(0, "Root", None));
        Self {
            id,
            state: Rc::new(RefCell::new(state)),
        }
    }

    pub fn stopped(self) -> Self {
        self.state.borrow_mut().status = Some(ServerStatus::stopped());
        self
    }

    pub fn with_user(self, user: UserRecord) -> Self {
        self.state.borrow_mut().users.insert(user.id, user);
        self
    }

    pub fn with_channel(self, channel: Channel) -> Self {
        self.state.borrow_mut().channels.insert(channel.id, channel);
        self
    }

    pub fn with_group(self, channel_id: ChannelId, group: Group) -> Self {
        self.state
            .borrow_mut()
            .acls
            .entry(channel_id)
            .or_insert_with(|| AclSnapshot::with_groups(Vec::new()))
            .groups
            .push(group);
        self
    }

    pub fn channel_ids(&self) -> Vec<ChannelId> {
        self.state.borrow().channels.keys().copied().collect()
    }

    pub fn user_ids(&self) -> Vec<UserId> {
        self.state.borrow().users.keys().copied().collect()
    }

    pub fn position_of(&self, channel_id: ChannelId) -> Option<i32> {
        self.state.borrow().channels.get(&channel_id).map(|c| c.position)
    }
}

impl VirtualServer for FakeServer {
    type Error = String;

    fn id(&self) -> ServerId {
        self.id
    }

    fn status(&self) -> Result<ServerStatus, Self::Error> {
        self.state
            .borrow()
            .status
            .ok_or_else(|| "status unavailable".to_string())
    }

    fn registered_user_ids(&self, filter: &str) -> Result<Vec<UserId>, Self::Error> {
        Ok(self
            .state
            .borrow()
            .users
            .values()
            .filter(|u| filter.is_empty() || u.name.contains(filter))
            .map(|u| u.id)
            .collect())
    }

    fn registration(&self, user_id: UserId) -> Result<UserRecord, Self::Error> {
        self.state
            .borrow()
            .users
            .get(&user_id)
            .cloned()
            .ok_or_else(|| format!("invalid user #{}", user_id))
    }

    fn unregister_user(&mut self, user_id: UserId) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        if state.reject_unregister.contains(&user_id) {
            return Err(format!("unregister of #{} rejected", user_id));
        }
        state
            .users
            .remove(&user_id)
            .ok_or_else(|| format!("invalid user #{}", user_id))?;
        state.unregistered.push(user_id);
        Ok(())
    }

    fn channels(&self) -> Result<BTreeMap<ChannelId, Channel>, Self::Error> {
        let mut state = self.state.borrow_mut();
        if state.fail_channel_listing {
            return Err("channel listing failed".to_string());
        }
        state.channel_fetches += 1;
        Ok(state.channels.clone())
    }

    fn channel_acl(&self, channel_id: ChannelId) -> Result<AclSnapshot, Self::Error> {
        let state = self.state.borrow();
        if !state.channels.contains_key(&channel_id) {
            return Err(format!("invalid channel #{}", channel_id));
        }
        Ok(state.acls.get(&channel_id).cloned().unwrap_or_default())
    }

    fn remove_channel(&mut self, channel_id: ChannelId) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        if state.reject_remove.contains(&channel_id) {
            return Err(format!("removal of #{} rejected", channel_id));
        }
        if channel_id == 0 || !state.channels.contains_key(&channel_id) {
            return Err(format!("invalid channel #{}", channel_id));
        }
        if state.channels.values().any(|c| c.parent == Some(channel_id)) {
            return Err(format!("channel #{} still has children", channel_id));
        }
        state.channels.remove(&channel_id);
        state.acls.remove(&channel_id);
        state.removed_channels.push(channel_id);
        Ok(())
    }

    fn set_channel_state(&mut self, channel: &Channel) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        if state.reject_set.contains(&channel.id) {
            return Err(format!("update of #{} rejected", channel.id));
        }
        let slot = state
            .channels
            .get_mut(&channel.id)
            .ok_or_else(|| format!("invalid channel #{}", channel.id))?;
        *slot = channel.clone();
        state.state_writes.push(channel.clone());
        Ok(())
    }
}

/// Fake discovery endpoint
#[derive(Debug, Default)]
pub struct FakeMeta {
    pub servers: Vec<FakeServer>,
    pub fail_listing: bool,
    pub lost: Cell<bool>,
}

impl FakeMeta {
    pub fn new(servers: Vec<FakeServer>) -> Self {
        Self {
            servers,
            ..Default::default()
        }
    }
}

impl MetaServer for FakeMeta {
    type Server = FakeServer;
    type Error = String;

    fn servers(&self) -> Result<Vec<FakeServer>, Self::Error> {
        if self.fail_listing {
            return Err("connection refused".to_string());
        }
        Ok(self.servers.clone())
    }

    fn check(&self) -> Result<(), Self::Error> {
        if self.lost.get() {
            Err("connection reset".to_string())
        } else {
            Ok(())
        }
    }
}
