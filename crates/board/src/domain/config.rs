//! Board configuration
//!
//! # Example
//!
//! ```ignore
//! use board::{Board, BoardConfig, UnboundEventPolicy};
//!
//! let board = Board::with_config(
//!     BoardConfig::default().with_unbound_events(UnboundEventPolicy::Reject),
//! );
//! ```

use serde::{Deserialize, Serialize};

/// What `fire` does with an event type that has no bound capability.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnboundEventPolicy {
    /// Deliver to nobody and succeed. Publishers stay decoupled from
    /// registration order.
    #[default]
    Ignore,
    /// Fail with `BoardError::UnboundEvent`.
    Reject,
}

/// Board configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Handling of events fired with no bound capability.
    pub unbound_events: UnboundEventPolicy,
}

impl BoardConfig {
    /// Builder-style method to set the unbound event policy
    #[must_use]
    pub fn with_unbound_events(mut self, policy: UnboundEventPolicy) -> Self {
        self.unbound_events = policy;
        self
    }

    /// Whether unbound events fail.
    #[must_use]
    pub fn rejects_unbound_events(&self) -> bool {
        self.unbound_events == UnboundEventPolicy::Reject
    }
}
