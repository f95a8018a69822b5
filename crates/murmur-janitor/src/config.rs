//! Configuration for Janitor operations
//!
//! Defines the bad-name denylist, retention windows and the group names that
//! drive channel pruning and position normalization.

use crate::JanitorError;
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Configuration for the Janitor
///
/// Defaults reproduce the fixed production policy; the presets and the
/// per-field overrides exist so tests and staging clusters can run with
/// accelerated windows.
///
/// # Examples
///
/// ```
/// use murmur_janitor::JanitorConfig;
///
/// // Default configuration (production policy)
/// let config = JanitorConfig::default();
/// assert_eq!(config.bad_name_grace_hours, 24);
/// assert_eq!(config.inactive_days, 365);
///
/// // Aggressive cleanup
/// let config = JanitorConfig::aggressive();
/// assert_eq!(config.inactive_days, 90);
///
/// // Lenient cleanup
/// let config = JanitorConfig::lenient();
/// assert_eq!(config.inactive_days, 730);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JanitorConfig {
    /// Auto-generated default names left behind by misconfigured clients
    /// Default: Mumla_User, Plumble_User
    pub bad_names: Vec<String>,

    /// Grace period for accounts with a bad name (in hours)
    /// Default: 24 hours
    pub bad_name_grace_hours: u64,

    /// Inactivity window for all other accounts (in days)
    /// Default: 365 days
    pub inactive_days: u64,

    /// Account that is never removed for inactivity
    /// Default: SuperUser
    pub protected_user: String,

    /// Group whose explicit members protect a channel from pruning
    /// Default: admin
    pub admin_group: String,

    /// Marker group: children of a channel defining it get position 0
    /// Default: no_position_for_children
    pub position_marker_group: String,

    /// Name filter passed to the registration listing (empty = all)
    pub registration_filter: String,

    /// Dry-run mode: report every decision without issuing mutations
    /// Default: false
    pub dry_run: bool,
}

impl Default for JanitorConfig {
    /// Production policy
    ///
    /// - Bad names: Mumla_User, Plumble_User with a 1 day grace period
    /// - Inactivity: 365 days, SuperUser exempt
    fn default() -> Self {
        Self {
            bad_names: vec!["Mumla_User".to_string(), "Plumble_User".to_string()],
            bad_name_grace_hours: 24,
            inactive_days: 365,
            protected_user: "SuperUser".to_string(),
            admin_group: "admin".to_string(),
            position_marker_group: "no_position_for_children".to_string(),
            registration_filter: String::new(),
            dry_run: false,
        }
    }
}

impl JanitorConfig {
    /// Aggressive cleanup configuration (shorter windows)
    ///
    /// - Bad names: 1 hour grace
    /// - Inactivity: 90 days
    pub fn aggressive() -> Self {
        Self {
            bad_name_grace_hours: 1,
            inactive_days: 90,
            ..Self::default()
        }
    }

    /// Lenient cleanup configuration (longer windows)
    ///
    /// - Bad names: 7 days grace
    /// - Inactivity: 730 days (2 years)
    pub fn lenient() -> Self {
        Self {
            bad_name_grace_hours: 7 * 24,
            inactive_days: 730,
            ..Self::default()
        }
    }

    /// Get the bad-name grace period as Duration
    ///
    /// Saturates at `Duration::MAX` for values [`validate`](Self::validate)
    /// rejects.
    pub fn bad_name_grace(&self) -> Duration {
        hours(self.bad_name_grace_hours).unwrap_or(Duration::MAX)
    }

    /// Get the inactivity window as Duration
    ///
    /// Saturates at `Duration::MAX` for values [`validate`](Self::validate)
    /// rejects.
    pub fn inactivity_window(&self) -> Duration {
        days(self.inactive_days).unwrap_or(Duration::MAX)
    }

    /// Whether `name` is on the bad-name denylist
    pub fn is_bad_name(&self, name: &str) -> bool {
        self.bad_names.iter().any(|bad| bad == name)
    }

    /// Check that the configuration can drive a run
    pub fn validate(&self) -> Result<(), JanitorError> {
        if self.bad_name_grace_hours == 0 {
            return Err(JanitorError::Config(
                "bad_name_grace_hours must be greater than zero".to_string(),
            ));
        }
        if self.inactive_days == 0 {
            return Err(JanitorError::Config(
                "inactive_days must be greater than zero".to_string(),
            ));
        }
        if hours(self.bad_name_grace_hours).is_none() {
            return Err(JanitorError::Config(format!(
                "bad_name_grace_hours {} is out of range",
                self.bad_name_grace_hours
            )));
        }
        if days(self.inactive_days).is_none() {
            return Err(JanitorError::Config(format!(
                "inactive_days {} is out of range",
                self.inactive_days
            )));
        }
        for (field, value) in [
            ("protected_user", &self.protected_user),
            ("admin_group", &self.admin_group),
            ("position_marker_group", &self.position_marker_group),
        ] {
            if value.is_empty() {
                return Err(JanitorError::Config(format!("{} must not be empty", field)));
            }
        }
        Ok(())
    }
}

fn hours(value: u64) -> Option<Duration> {
    i64::try_from(value).ok().and_then(Duration::try_hours)
}

fn days(value: u64) -> Option<Duration> {
    i64::try_from(value).ok().and_then(Duration::try_days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = JanitorConfig::default();
        assert_eq!(config.bad_names, vec!["Mumla_User", "Plumble_User"]);
        assert_eq!(config.bad_name_grace_hours, 24);
        assert_eq!(config.inactive_days, 365);
        assert_eq!(config.protected_user, "SuperUser");
        assert_eq!(config.admin_group, "admin");
        assert_eq!(config.position_marker_group, "no_position_for_children");
        assert!(config.registration_filter.is_empty());
        assert!(!config.dry_run);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        let default = JanitorConfig::default();
        let aggressive = JanitorConfig::aggressive();
        let lenient = JanitorConfig::lenient();

        assert!(aggressive.inactive_days < default.inactive_days);
        assert!(aggressive.bad_name_grace_hours < default.bad_name_grace_hours);
        assert!(lenient.inactive_days > default.inactive_days);
        assert!(lenient.bad_name_grace_hours > default.bad_name_grace_hours);
        assert_eq!(aggressive.bad_names, default.bad_names);
    }

    #[test]
    fn test_duration_conversions() {
        let config = JanitorConfig::default();

        assert_eq!(config.bad_name_grace(), Duration::days(1));
        assert_eq!(config.inactivity_window(), Duration::days(365));
    }

    #[test]
    fn test_is_bad_name_exact_match() {
        let config = JanitorConfig::default();
        assert!(config.is_bad_name("Mumla_User"));
        assert!(config.is_bad_name("Plumble_User"));
        assert!(!config.is_bad_name("mumla_user"));
        assert!(!config.is_bad_name("Mumla_User2"));
    }

    #[test]
    fn test_validate_rejects_zero_windows() {
        let config = JanitorConfig {
            inactive_days: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(JanitorError::Config(_))));

        let config = JanitorConfig {
            bad_name_grace_hours: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = JanitorConfig {
            admin_group: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_windows() {
        let config: JanitorConfig = toml::from_str("inactive_days = 200000000000").unwrap();
        assert!(matches!(config.validate(), Err(JanitorError::Config(_))));
        assert_eq!(config.inactivity_window(), Duration::MAX);

        let config = JanitorConfig {
            bad_name_grace_hours: u64::MAX,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(JanitorError::Config(_))));
        assert_eq!(config.bad_name_grace(), Duration::MAX);

        let config = JanitorConfig {
            inactive_days: 100_000,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: JanitorConfig = toml::from_str(
            r#"
            inactive_days = 30
            bad_names = ["Guest"]
            "#,
        )
        .unwrap();

        assert_eq!(config.inactive_days, 30);
        assert_eq!(config.bad_names, vec!["Guest"]);
        assert_eq!(config.bad_name_grace_hours, 24);
        assert_eq!(config.admin_group, "admin");
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = JanitorConfig::aggressive();
        let serialized = serde_json::to_string(&config).unwrap();
        let deserialized: JanitorConfig = serde_json::from_str(&serialized).unwrap();

        assert_eq!(config, deserialized);
    }
}
