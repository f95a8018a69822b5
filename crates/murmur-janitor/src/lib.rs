//! Murmur Janitor
//!
//! Periodic maintenance for a multi-tenant voice-chat server cluster, reached
//! through the administrative RPC interface.
//!
//! # Overview
//!
//! For every running instance the Janitor, in this order:
//! - **Bad-name sweep**: removes registrations named like an auto-generated
//!   client default, unless used within the grace period
//! - **Inactivity sweep**: removes registrations not seen within the retention
//!   window (the protected super-user account is exempt)
//! - **Channel pruning**: removes permanent leaf channels nobody administers,
//!   repeating until a pass removes nothing
//! - **Position normalization**: resets child positions under channels that
//!   carry the position marker group
//!
//! | Step | Removes / changes | Protected |
//! |------|-------------------|-----------|
//! | Bad-name sweep | denylisted names idle > 1 day | active within grace |
//! | Inactivity sweep | accounts idle > 365 days | `SuperUser` |
//! | Channel pruning | leaves without admin members | root, temporary, non-leaves |
//! | Position normalization | child position → 0 | everything else |
//!
//! # Usage
//!
//! ## One-time Run
//!
//! ```no_run
//! use murmur_janitor::{Janitor, JanitorConfig};
//! use murmur_rpc::{ConnectOptions, MetaClient};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let meta = MetaClient::connect("http://127.0.0.1:6502", ConnectOptions::default())?;
//! let mut janitor = Janitor::default_config();
//!
//! let metrics = janitor.run(&meta)?;
//! println!("{}", metrics.summary());
//! # Ok(())
//! # }
//! ```
//!
//! ## Collecting Events
//!
//! Steps report through an injected [`Reporter`]; a `Vec<JanitorEvent>`
//! collects them instead of logging.
//!
//! ```
//! use murmur_janitor::{Janitor, JanitorConfig, JanitorEvent};
//!
//! let janitor = Janitor::with_reporter(JanitorConfig::default(), Vec::<JanitorEvent>::new());
//! assert!(janitor.reporter().is_empty());
//! ```
//!
//! # Configuration
//!
//! The Janitor can be configured via TOML:
//!
//! ```toml
//! [janitor]
//! bad_names = ["Mumla_User", "Plumble_User"]
//! bad_name_grace_hours = 24
//! inactive_days = 365
//! protected_user = "SuperUser"
//! admin_group = "admin"
//! position_marker_group = "no_position_for_children"
//! dry_run = false
//! ```

#![warn(missing_docs)]

mod channels;
mod classifier;
mod config;
mod error;
mod janitor;
mod metrics;
mod positions;
mod report;
mod users;

pub use channels::{is_administered, leaf_candidates};
pub use classifier::{
    classify, classify_record, parse_last_active, Decision, RetentionPolicy, LAST_ACTIVE_FORMAT,
};
pub use config::JanitorConfig;
pub use error::JanitorError;
pub use janitor::Janitor;
pub use metrics::JanitorMetrics;
pub use positions::{children_to_reset, restricts_children};
pub use report::{format_uptime, JanitorEvent, Operation, Reporter, TracingReporter};
