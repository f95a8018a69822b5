//! User module - registered accounts on an instance

/// Identifier of a registered user, unique per instance
pub type UserId = i32;

/// Registration record as returned by the management channel
///
/// Only the fields the retention policies look at are modelled; the remote
/// side may carry more (email, certificate hash, comment) which are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Registration id
    pub id: UserId,

    /// Display name
    pub name: String,

    /// Last activity in `YYYY-MM-DD HH:MM:SS` server-local time, if ever recorded
    pub last_active: Option<String>,
}

impl UserRecord {
    /// Create a record with a recorded activity timestamp
    pub fn new(id: UserId, name: impl Into<String>, last_active: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            last_active: Some(last_active.into()),
        }
    }

    /// Create a record for an account that was never seen online
    pub fn never_active(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            last_active: None,
        }
    }

    /// Last activity, treating an empty string the same as absent
    pub fn last_active(&self) -> Option<&str> {
        self.last_active.as_deref().filter(|s| !s.is_empty())
    }
}
