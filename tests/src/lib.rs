//! # Blackboard Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── support.rs        # Shared fixtures: events, capabilities, listeners
//! │
//! └── integration/      # Cross-crate scenarios
//!     ├── blackboard_flows.rs
//!     └── concurrency.rs
//!
//! tests/benches/
//! └── dispatch_benchmarks.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p board-tests
//!
//! # By category
//! cargo test -p board-tests integration::blackboard_flows::
//! cargo test -p board-tests integration::concurrency::
//!
//! # With logs
//! RUST_LOG=board=trace cargo test -p board-tests -- --nocapture
//!
//! # Benchmarks
//! cargo bench -p board-tests
//! ```

#![allow(dead_code)]
