//! Domain Layer - registry state of a board
//!
//! This layer contains:
//! - The binding table (capability ↔ event type)
//! - Copy-on-write subscriber sets
//! - Board configuration
//!
//! RULES:
//! - No I/O operations
//! - No locking; the service layer owns synchronization

pub mod binding;
pub mod config;
pub mod subscribers;

pub use binding::{Binding, BindingTable};
pub use config::{BoardConfig, UnboundEventPolicy};
pub use subscribers::{Subscriber, SubscriberSet};
