//! Metrics collection for Janitor operations

use crate::{JanitorEvent, RetentionPolicy};
use std::collections::HashMap;

/// Metrics collected during Janitor runs
///
/// Fed from the same event stream the reporter sees. Dry-run decisions are
/// counted as if they had been applied.
#[derive(Debug, Clone, Default)]
pub struct JanitorMetrics {
    /// Users removed per policy
    pub users_removed: HashMap<RetentionPolicy, usize>,

    /// Channels removed by pruning
    pub channels_removed: usize,

    /// Pruning passes executed (including the final empty pass)
    pub prune_passes: usize,

    /// Channels carrying the position marker group
    pub restricting_parents: usize,

    /// Child positions reset to 0
    pub positions_reset: usize,

    /// Mutations rejected by a server
    pub mutation_failures: usize,

    /// Running instances maintained
    pub servers_processed: usize,

    /// Instances skipped because they were not running
    pub servers_skipped: usize,

    /// Instances whose maintenance stopped on an error
    pub servers_failed: usize,

    /// Completed runs
    pub run_count: usize,

    /// Total runtime in milliseconds
    pub total_runtime_ms: u64,
}

impl JanitorMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Update counters from one event
    pub fn record(&mut self, event: &JanitorEvent) {
        match event {
            JanitorEvent::NoServers => {}
            JanitorEvent::ServerFound { .. } => self.servers_processed += 1,
            JanitorEvent::ServerSkipped { .. } => self.servers_skipped += 1,
            JanitorEvent::ServerFailed { .. } => self.servers_failed += 1,
            JanitorEvent::UserRemoved { policy, .. } => {
                *self.users_removed.entry(*policy).or_insert(0) += 1;
            }
            JanitorEvent::ChannelRemoved { .. } => self.channels_removed += 1,
            JanitorEvent::PrunePassCompleted { .. } => self.prune_passes += 1,
            JanitorEvent::RestrictingParent { .. } => self.restricting_parents += 1,
            JanitorEvent::PositionReset { .. } => self.positions_reset += 1,
            JanitorEvent::UserRemovalRejected { .. } | JanitorEvent::MutationFailed { .. } => {
                self.mutation_failures += 1
            }
        }
    }

    /// Record a run completion
    pub fn record_run(&mut self, runtime_ms: u64) {
        self.run_count += 1;
        self.total_runtime_ms += runtime_ms;
    }

    /// Users removed under one policy
    pub fn removed_under(&self, policy: RetentionPolicy) -> usize {
        self.users_removed.get(&policy).copied().unwrap_or(0)
    }

    /// Get total users removed across all policies
    pub fn total_users_removed(&self) -> usize {
        self.users_removed.values().sum()
    }

    /// Removals plus position resets
    pub fn total_mutations(&self) -> usize {
        self.total_users_removed() + self.channels_removed + self.positions_reset
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Janitor Metrics Summary".to_string(),
            "=======================".to_string(),
            format!("Runs: {}", self.run_count),
            format!("Total runtime: {}ms", self.total_runtime_ms),
            format!(
                "Servers: {} processed, {} skipped, {} failed",
                self.servers_processed, self.servers_skipped, self.servers_failed
            ),
            String::new(),
        ];

        if !self.users_removed.is_empty() {
            lines.push("Users removed by policy:".to_string());
            for policy in RetentionPolicy::ALL {
                if let Some(count) = self.users_removed.get(&policy) {
                    lines.push(format!("  {}: {}", policy, count));
                }
            }
            lines.push(format!("  Total: {}", self.total_users_removed()));
            lines.push(String::new());
        }

        lines.push(format!(
            "Channels removed: {} ({} passes)",
            self.channels_removed, self.prune_passes
        ));
        lines.push(format!(
            "Positions reset: {} (under {} restricting parents)",
            self.positions_reset, self.restricting_parents
        ));

        if self.mutation_failures > 0 {
            lines.push(format!("Rejected mutations: {}", self.mutation_failures));
        }

        lines.join("\n")
    }
}
