//! Core Janitor implementation: per-instance maintenance and the run driver

use crate::{
    JanitorConfig, JanitorError, JanitorEvent, JanitorMetrics, Reporter, RetentionPolicy,
    TracingReporter,
};
use chrono::NaiveDateTime;
use murmur_domain::{MetaServer, ServerId, VirtualServer};
use std::time::Instant;

/// Server-local wall clock, matching how last-activity timestamps are written
fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Janitor for a voice-chat server cluster
///
/// Responsible for:
/// - Removing registrations with auto-generated default names
/// - Removing registrations inactive beyond the retention window
/// - Pruning leaf channels nobody administers, until none are left
/// - Resetting child positions under channels that restrict ordering
///
/// # Examples
///
/// ```no_run
/// use murmur_janitor::{Janitor, JanitorConfig};
/// use murmur_rpc::{ConnectOptions, MetaClient};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let meta = MetaClient::connect("http://127.0.0.1:6502", ConnectOptions::default())?;
/// let mut janitor = Janitor::new(JanitorConfig::default());
///
/// let metrics = janitor.run(&meta)?;
/// println!("{}", metrics.summary());
/// # Ok(())
/// # }
/// ```
pub struct Janitor<R: Reporter = TracingReporter> {
    pub(crate) config: JanitorConfig,
    reporter: R,
    metrics: JanitorMetrics,
    clock: fn() -> NaiveDateTime,
}

impl Janitor<TracingReporter> {
    /// Create a new Janitor that logs through `tracing`
    pub fn new(config: JanitorConfig) -> Self {
        Self::with_reporter(config, TracingReporter)
    }

    /// Create a Janitor with default configuration
    pub fn default_config() -> Self {
        Self::new(JanitorConfig::default())
    }
}

impl<R: Reporter> Janitor<R> {
    /// Create a Janitor that sends its events to `reporter`
    pub fn with_reporter(config: JanitorConfig, reporter: R) -> Self {
        Self {
            config,
            reporter,
            metrics: JanitorMetrics::new(),
            clock: local_now,
        }
    }

    /// Replace the clock used as "now" by the retention policies
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    /// Get the configuration
    pub fn config(&self) -> &JanitorConfig {
        &self.config
    }

    /// Get a reference to the current metrics
    pub fn metrics(&self) -> &JanitorMetrics {
        &self.metrics
    }

    /// Reset metrics counters
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Get the reporter
    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Consume the janitor, returning its reporter
    pub fn into_reporter(self) -> R {
        self.reporter
    }

    pub(crate) fn now(&self) -> NaiveDateTime {
        (self.clock)()
    }

    pub(crate) fn emit(&mut self, event: JanitorEvent) {
        self.metrics.record(&event);
        self.reporter.report(&event);
    }

    /// Maintain every running instance reachable through `meta`
    ///
    /// Instances are handled one at a time. An instance that fails is
    /// reported and the run moves on, unless the management handle itself no
    /// longer answers, in which case the run stops with
    /// [`JanitorError::Connection`]. If any instance failed the run ends with
    /// [`JanitorError::ServersFailed`] once all were attempted.
    pub fn run<M: MetaServer>(&mut self, meta: &M) -> Result<JanitorMetrics, JanitorError> {
        self.config.validate()?;
        let start = Instant::now();

        let servers = meta
            .servers()
            .map_err(|e| JanitorError::Connection(format!("cannot list servers: {}", e)))?;

        if servers.is_empty() {
            self.emit(JanitorEvent::NoServers);
        }

        let mut failed: Vec<ServerId> = Vec::new();
        for mut server in servers {
            let server_id = server.id();
            if let Err(err) = self.maintain(&mut server) {
                self.emit(JanitorEvent::ServerFailed {
                    server_id,
                    message: err.to_string(),
                });
                failed.push(server_id);

                meta.check().map_err(|e| {
                    JanitorError::Connection(format!(
                        "management handle lost after server {} failed: {}",
                        server_id, e
                    ))
                })?;
            }
        }

        self.metrics.record_run(start.elapsed().as_millis() as u64);
        tracing::debug!("Run finished:\n{}", self.metrics.summary());

        if !failed.is_empty() {
            return Err(JanitorError::ServersFailed { failed });
        }
        Ok(self.metrics.clone())
    }

    /// Run every maintenance step against one instance, in order
    ///
    /// Returns `Ok(false)` when the instance is not running and was skipped.
    pub fn maintain<S: VirtualServer>(&mut self, server: &mut S) -> Result<bool, JanitorError> {
        let server_id = server.id();
        let status = server
            .status()
            .map_err(|e| JanitorError::server(server_id, e))?;

        if !status.running {
            self.emit(JanitorEvent::ServerSkipped { server_id });
            return Ok(false);
        }

        self.emit(JanitorEvent::ServerFound {
            server_id,
            uptime_secs: status.uptime_secs,
        });

        for policy in RetentionPolicy::ALL {
            self.sweep_users(server, policy)?;
        }
        self.prune_channels(server)?;
        self.normalize_positions(server)?;

        Ok(true)
    }
}
