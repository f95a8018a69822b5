//! Retention classifier: KEEP/REMOVE decisions for registered users

use crate::{JanitorConfig, JanitorError};
use chrono::NaiveDateTime;
use murmur_domain::UserRecord;
use std::fmt;

/// Format of last-activity timestamps on the wire (server-local time)
pub const LAST_ACTIVE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Policy under which a user sweep classifies registrations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RetentionPolicy {
    /// Denylisted auto-generated names, short grace period
    BadName,
    /// Every account except the protected one, long window
    Inactivity,
}

impl RetentionPolicy {
    /// Policies in the order a maintenance pass applies them
    pub const ALL: [RetentionPolicy; 2] = [RetentionPolicy::BadName, RetentionPolicy::Inactivity];

    /// Policy name as used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            RetentionPolicy::BadName => "bad-name",
            RetentionPolicy::Inactivity => "inactivity",
        }
    }
}

impl fmt::Display for RetentionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classifying one registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Leave the registration alone
    Keep,
    /// Unregister the user
    Remove,
}

/// Parse a last-activity timestamp in [`LAST_ACTIVE_FORMAT`]
pub fn parse_last_active(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value, LAST_ACTIVE_FORMAT)
}

/// Classify a user under `policy`
///
/// `last_active = None` means the account was never seen online, which always
/// counts as expired. Activity in the future is treated as recent.
pub fn classify(
    config: &JanitorConfig,
    name: &str,
    last_active: Option<NaiveDateTime>,
    now: NaiveDateTime,
    policy: RetentionPolicy,
) -> Decision {
    if !applies_to(config, name, policy) {
        return Decision::Keep;
    }

    let window = match policy {
        RetentionPolicy::BadName => config.bad_name_grace(),
        RetentionPolicy::Inactivity => config.inactivity_window(),
    };

    match last_active {
        None => Decision::Remove,
        Some(at) if now - at > window => Decision::Remove,
        Some(_) => Decision::Keep,
    }
}

/// Classify a raw registration record, parsing its timestamp only when the
/// policy actually looks at it
///
/// A malformed timestamp on a user the policy exempts by name is ignored; on
/// any other user it is an error.
pub fn classify_record(
    config: &JanitorConfig,
    user: &UserRecord,
    now: NaiveDateTime,
    policy: RetentionPolicy,
) -> Result<(Decision, Option<NaiveDateTime>), JanitorError> {
    if !applies_to(config, &user.name, policy) {
        return Ok((Decision::Keep, None));
    }

    let last_active = user
        .last_active()
        .map(|raw| {
            parse_last_active(raw).map_err(|source| JanitorError::TimestampFormat {
                user_id: user.id,
                value: raw.to_string(),
                source,
            })
        })
        .transpose()?;

    Ok((classify(config, &user.name, last_active, now, policy), last_active))
}

fn applies_to(config: &JanitorConfig, name: &str, policy: RetentionPolicy) -> bool {
    match policy {
        RetentionPolicy::BadName => config.is_bad_name(name),
        RetentionPolicy::Inactivity => name != config.protected_user,
    }
}
