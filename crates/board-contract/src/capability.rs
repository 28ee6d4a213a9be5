//! # Capabilities
//!
//! The capability-declaration convention.
//!
//! A capability is a listener contract: a Rust type (usually a `dyn Trait`
//! listener interface) whose [`Capability::contract`] describes the handling
//! operations it declares. The description is plain data so that the
//! validator can reject malformed contracts at registration time instead of
//! failing at dispatch.
//!
//! ```rust,ignore
//! trait PaymentListener: Send + Sync {
//!     fn on_payment(&self, event: &PaymentEvent);
//! }
//!
//! impl Capability for dyn PaymentListener {
//!     fn contract() -> Contract {
//!         Contract::of::<Self>().handler(
//!             HandlerSignature::new("on_payment").param(ParamType::event::<PaymentEvent>()),
//!         )
//!     }
//! }
//! ```

use crate::event::{Event, EventType};
use crate::key::TypeKey;
use std::fmt;

/// Identity of a capability.
pub type CapabilityId = TypeKey;

/// A listener contract.
pub trait Capability: 'static {
    /// The declared handling operations.
    fn contract() -> Contract;

    /// Identity of this capability.
    fn id() -> CapabilityId {
        TypeKey::of::<Self>()
    }
}

/// Declared type of one handler parameter.
#[derive(Clone, PartialEq, Eq)]
pub enum ParamType {
    /// A concrete event type.
    Event(EventType),
    /// The bare event marker, not bound to any concrete event category.
    Marker,
    /// Any type that is not an event.
    Value(TypeKey),
}

impl ParamType {
    /// Parameter of event type `E`.
    #[must_use]
    pub fn event<E: Event>() -> Self {
        Self::Event(EventType::of::<E>())
    }

    /// Parameter typed as the bare event marker.
    #[must_use]
    pub fn marker() -> Self {
        Self::Marker
    }

    /// Parameter of non-event type `T`.
    #[must_use]
    pub fn value<T: ?Sized + 'static>() -> Self {
        Self::Value(TypeKey::of::<T>())
    }

    /// Name used in diagnostics.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Event(event) => event.key().short_name(),
            Self::Marker => "dyn Event".to_string(),
            Self::Value(key) => key.short_name(),
        }
    }
}

impl fmt::Debug for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Event(event) => write!(f, "Event({})", event.key().short_name()),
            Self::Marker => f.write_str("Marker"),
            Self::Value(key) => write!(f, "Value({})", key.short_name()),
        }
    }
}

/// Signature of one declared handling operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandlerSignature {
    name: &'static str,
    params: Vec<ParamType>,
}

impl HandlerSignature {
    /// A handler with no parameters yet.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            params: Vec::new(),
        }
    }

    /// Appends a parameter.
    #[must_use]
    pub fn param(mut self, param: ParamType) -> Self {
        self.params.push(param);
        self
    }

    /// Handler name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared parameters, in order.
    #[must_use]
    pub fn params(&self) -> &[ParamType] {
        &self.params
    }
}

/// Declaration of a capability: identity plus handling operations.
#[derive(Clone, Debug)]
pub struct Contract {
    id: CapabilityId,
    handlers: Vec<HandlerSignature>,
}

impl Contract {
    /// Empty contract for capability type `C`.
    #[must_use]
    pub fn of<C: ?Sized + 'static>() -> Self {
        Self::named(TypeKey::of::<C>())
    }

    /// Empty contract for an already-resolved capability identity.
    #[must_use]
    pub fn named(id: CapabilityId) -> Self {
        Self {
            id,
            handlers: Vec::new(),
        }
    }

    /// Declares a handling operation.
    #[must_use]
    pub fn handler(mut self, signature: HandlerSignature) -> Self {
        self.handlers.push(signature);
        self
    }

    /// Capability identity.
    #[must_use]
    pub fn id(&self) -> CapabilityId {
        self.id
    }

    /// Declared handling operations.
    #[must_use]
    pub fn handlers(&self) -> &[HandlerSignature] {
        &self.handlers
    }
}
