//! # Board Contract
//!
//! Declaration conventions consumed by the blackboard, and the contract
//! validator that checks them.
//!
//! ## Conventions
//!
//! - **Events**: any type implementing [`Event`]. Refinement of another event
//!   is declared through [`Event::lineage`].
//! - **Capabilities**: listener contracts implementing [`Capability`], whose
//!   [`Contract`] lists the declared handling operations.
//!
//! ## Validation
//!
//! [`validate`] is a pure function: given a contract and an event type it
//! either returns a [`ValidatedContract`] describing how events reach the
//! handler, or a [`ContractError`].
//!
//! ```text
//! Contract { handlers: [on_payment(PaymentEvent)] } + EventType(PaymentEvent)
//!     └── validate() ──► ValidatedContract { delivery: Exact }
//!
//! Contract { handlers: [on_payment(PaymentEvent)] } + EventType(PaymentFailed)
//!     └── validate() ──► ValidatedContract { delivery: Upcast(PaymentEvent) }
//! ```

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod capability;
pub mod errors;
pub mod event;
pub mod key;
pub mod validator;

pub use capability::{Capability, CapabilityId, Contract, HandlerSignature, ParamType};
pub use errors::{ContractError, Incompatibility};
pub use event::{Ancestor, AsAny, Event, EventType, Lineage, Upcast};
pub use key::TypeKey;
pub use validator::{validate, Delivery, ValidatedContract};
