//! # Error Types
//!
//! Contract validation failures.

use crate::key::TypeKey;
use thiserror::Error;

/// Reasons a capability contract cannot be bound to an event type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    /// The contract declares no handling operation.
    #[error("capability {capability} declares no handler")]
    NoHandlerFound { capability: TypeKey },

    /// The contract declares more than one handling operation.
    #[error("capability {capability} declares {} handlers ({}); exactly one is allowed", .handlers.len(), .handlers.join(", "))]
    DuplicateHandler {
        capability: TypeKey,
        handlers: Vec<&'static str>,
    },

    /// The single handling operation cannot accept the event type.
    #[error("handler {capability}::{handler} cannot accept {event}: {reason}")]
    IncompatibleHandler {
        capability: TypeKey,
        handler: &'static str,
        event: TypeKey,
        reason: Incompatibility,
    },
}

/// Why a handler signature is incompatible with an event type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Incompatibility {
    /// Wrong number of parameters.
    #[error("expected exactly one parameter, found {found}")]
    Arity { found: usize },

    /// The parameter type is not an event.
    #[error("parameter type {param} is not an event")]
    NotAnEvent { param: TypeKey },

    /// The parameter is the bare event marker instead of a concrete event.
    #[error("parameter is the bare event marker, not a concrete event type")]
    BareMarker,

    /// The parameter is an event, but neither the registered event nor one of its ancestors.
    #[error("parameter event {param} is not {event} or one of its ancestors")]
    Unrelated { param: TypeKey, event: TypeKey },
}

impl ContractError {
    /// The capability the error is about.
    #[must_use]
    pub fn capability(&self) -> TypeKey {
        match self {
            Self::NoHandlerFound { capability }
            | Self::DuplicateHandler { capability, .. }
            | Self::IncompatibleHandler { capability, .. } => *capability,
        }
    }
}
