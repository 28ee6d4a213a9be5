//! Metrics for board operations
//!
//! Counters for registration, subscription and dispatch activity. The board
//! only counts; exporting the numbers is up to the host.
//!
//! ## Usage
//!
//! ```ignore
//! let board = Board::new();
//! // ... register, subscribe, fire ...
//! let snapshot = board.metrics().snapshot();
//! println!("{} deliveries", snapshot.deliveries);
//! ```

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics collector for a board
///
/// Thread-safe counters, updated with relaxed ordering.
#[derive(Default, Debug)]
pub struct BoardMetrics {
    /// Bindings successfully registered
    pub bindings_registered: AtomicU64,
    /// `add_listener` calls that subscribed something new
    pub listeners_added: AtomicU64,
    /// `remove_listener` calls that removed something
    pub listeners_removed: AtomicU64,
    /// Events fired (bound or not)
    pub events_fired: AtomicU64,
    /// Events fired with no bound capability
    pub unbound_events: AtomicU64,
    /// Individual handler invocations that returned successfully
    pub deliveries: AtomicU64,
    /// Handler invocations that failed
    pub handler_failures: AtomicU64,
}

impl BoardMetrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new binding
    pub fn record_binding(&self) {
        self.bindings_registered.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a listener subscription
    pub fn record_listener_added(&self) {
        self.listeners_added.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a listener removal
    pub fn record_listener_removed(&self) {
        self.listeners_removed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a fired event
    ///
    /// # Arguments
    /// * `bound` - Whether a capability was bound to the event type
    pub fn record_fire(&self, bound: bool) {
        self.events_fired.fetch_add(1, Ordering::Relaxed);
        if !bound {
            self.unbound_events.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record the outcome of one fan-out
    ///
    /// # Arguments
    /// * `delivered` - Handlers that returned successfully
    /// * `failed` - Whether the fan-out stopped on a handler failure
    pub fn record_dispatch(&self, delivered: usize, failed: bool) {
        self.deliveries
            .fetch_add(delivered as u64, Ordering::Relaxed);
        if failed {
            self.handler_failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            bindings_registered: self.bindings_registered.load(Ordering::Relaxed),
            listeners_added: self.listeners_added.load(Ordering::Relaxed),
            listeners_removed: self.listeners_removed.load(Ordering::Relaxed),
            events_fired: self.events_fired.load(Ordering::Relaxed),
            unbound_events: self.unbound_events.load(Ordering::Relaxed),
            deliveries: self.deliveries.load(Ordering::Relaxed),
            handler_failures: self.handler_failures.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time snapshot of board metrics
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub bindings_registered: u64,
    pub listeners_added: u64,
    pub listeners_removed: u64,
    pub events_fired: u64,
    pub unbound_events: u64,
    pub deliveries: u64,
    pub handler_failures: u64,
}
