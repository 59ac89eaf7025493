//! Observability and Metrics
//!
//! Metrics collection for monitoring service health: connection churn,
//! request volume, and how often the store's rejection paths fire.
//!
//! Uses atomic counters for thread-safe collection across connection
//! tasks.

use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

/// Global metrics collector for store operations
#[derive(Debug, Default)]
pub struct Metrics {
    /// Total connections accepted
    pub connections_total: AtomicU64,
    /// Currently active connections
    pub connections_active: AtomicU64,
    /// Total requests dispatched
    pub requests_total: AtomicU64,
    /// Appends committed to the store
    pub appends_accepted: AtomicU64,
    /// Appends rejected by the capacity guard
    pub appends_rejected_capacity: AtomicU64,
    /// Appends rejected by the checksum check
    pub appends_rejected_checksum: AtomicU64,
    /// Reads rejected by the bounds check
    pub reads_rejected: AtomicU64,
    /// Connections dropped by decode failures
    pub decode_errors: AtomicU64,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new connection
    pub fn connection_established(&self) {
        self.connections_total.fetch_add(1, Ordering::Relaxed);
        self.connections_active.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a connection closed
    pub fn connection_closed(&self) {
        self.connections_active.fetch_sub(1, Ordering::Relaxed);
    }

    /// Record a dispatched request
    pub fn request_received(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a committed append
    pub fn append_accepted(&self) {
        self.appends_accepted.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an append stopped by the capacity guard
    pub fn append_rejected_capacity(&self) {
        self.appends_rejected_capacity.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an append stopped by the checksum check
    pub fn append_rejected_checksum(&self) {
        self.appends_rejected_checksum.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a read stopped by the bounds check
    pub fn read_rejected(&self) {
        self.reads_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a connection lost to a decode failure
    pub fn decode_error(&self) {
        self.decode_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            connections_total: self.connections_total.load(Ordering::Relaxed),
            connections_active: self.connections_active.load(Ordering::Relaxed),
            requests_total: self.requests_total.load(Ordering::Relaxed),
            appends_accepted: self.appends_accepted.load(Ordering::Relaxed),
            appends_rejected_capacity: self.appends_rejected_capacity.load(Ordering::Relaxed),
            appends_rejected_checksum: self.appends_rejected_checksum.load(Ordering::Relaxed),
            reads_rejected: self.reads_rejected.load(Ordering::Relaxed),
            decode_errors: self.decode_errors.load(Ordering::Relaxed),
        }
    }

    /// Log current metrics
    pub fn log_metrics(&self) {
        let snapshot = self.snapshot();
        info!(
            connections_total = snapshot.connections_total,
            connections_active = snapshot.connections_active,
            requests_total = snapshot.requests_total,
            appends_accepted = snapshot.appends_accepted,
            appends_rejected_capacity = snapshot.appends_rejected_capacity,
            appends_rejected_checksum = snapshot.appends_rejected_checksum,
            reads_rejected = snapshot.reads_rejected,
            decode_errors = snapshot.decode_errors,
            "Store metrics snapshot"
        );
    }
}

/// Snapshot of metrics at a point in time
#[derive(Debug, Clone)]
pub struct MetricsSnapshot {
    pub connections_total: u64,
    pub connections_active: u64,
    pub requests_total: u64,
    pub appends_accepted: u64,
    pub appends_rejected_capacity: u64,
    pub appends_rejected_checksum: u64,
    pub reads_rejected: u64,
    pub decode_errors: u64,
}

/// Global metrics instance (lazy static for simplicity)
static METRICS: once_cell::sync::Lazy<Metrics> = once_cell::sync::Lazy::new(Metrics::new);

/// Get the global metrics instance
pub fn global_metrics() -> &'static Metrics {
    &METRICS
}
