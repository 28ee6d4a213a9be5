//! # Board
//!
//! In-process publish/subscribe registry. Components declare interest in
//! typed events through capabilities; publishers fire events without knowing
//! who listens.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): registry state, no locking, no I/O
//!   - `BindingTable`: one-to-one capability ↔ event type bindings
//!   - `SubscriberSet`: copy-on-write, insertion-ordered listener sets
//!   - `BoardConfig`: unbound event policy
//!
//! - **Ports Layer** (`ports/`): what host code implements
//!   - `Listener`: declares typed handlers into a `HandlerTable`
//!
//! - **Service Layer** (`service/`): the `Board` itself
//!
//! ## Flow
//!
//! ```text
//! register::<dyn PaymentListener, PaymentEvent>()
//!     └── validate(contract, event type) ──► BindingTable
//!
//! add_listener(&audit)
//!     └── audit.handlers(table) ──► match against bindings ──► SubscriberSet
//!
//! fire(&payment)
//!     └── read lock: binding + snapshot ──► unlock ──► handler, handler, ...
//! ```
//!
//! ## Usage Example
//!
//! ```ignore
//! use board::{Board, Capability, Contract, Event, HandlerSignature, HandlerTable, Listener, ParamType};
//! use std::sync::Arc;
//!
//! struct PaymentEvent { amount: u64 }
//! impl Event for PaymentEvent {}
//!
//! trait PaymentListener: Send + Sync {
//!     fn on_payment(&self, event: &PaymentEvent);
//! }
//! impl Capability for dyn PaymentListener {
//!     fn contract() -> Contract {
//!         Contract::of::<Self>().handler(
//!             HandlerSignature::new("on_payment").param(ParamType::event::<PaymentEvent>()),
//!         )
//!     }
//! }
//!
//! struct Audit;
//! impl PaymentListener for Audit {
//!     fn on_payment(&self, event: &PaymentEvent) { println!("{}", event.amount); }
//! }
//! impl Listener for Audit {
//!     fn handlers(self: Arc<Self>, table: &mut HandlerTable) {
//!         table.bind::<dyn PaymentListener, PaymentEvent, _>(move |event| {
//!             self.on_payment(event);
//!             Ok(())
//!         });
//!     }
//! }
//!
//! let board = Board::new();
//! board.register::<dyn PaymentListener, PaymentEvent>()?;
//! board.add_listener(&Arc::new(Audit))?;
//! board.fire(&PaymentEvent { amount: 10 })?;
//! ```

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

pub use domain::{BoardConfig, UnboundEventPolicy};
pub use error::{BoardError, ErrorKind, RegistrationConflict};
pub use metrics::{BoardMetrics, MetricsSnapshot};
pub use ports::{HandlerResult, HandlerTable, Listener, ListenerId};
pub use service::Board;

pub use board_contract::{
    validate, Capability, CapabilityId, Contract, ContractError, Event, EventType,
    HandlerSignature, Incompatibility, Lineage, ParamType, TypeKey,
};
