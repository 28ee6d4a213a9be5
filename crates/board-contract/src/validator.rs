//! # Contract Validator
//!
//! Decides whether a capability contract may be bound to an event type.
//!
//! ## Rules
//!
//! 1. The contract declares exactly one handling operation
//!    (`NoHandlerFound` / `DuplicateHandler` otherwise).
//! 2. That operation takes exactly one parameter.
//! 3. The parameter is a concrete event type (not a plain value, not the bare
//!    marker).
//! 4. The parameter is the registered event type itself or an ancestor in
//!    its lineage.
//!
//! Pure: no state, no I/O, no logging.

use crate::capability::{CapabilityId, Contract, ParamType};
use crate::errors::{ContractError, Incompatibility};
use crate::event::{Ancestor, EventType};
use crate::key::TypeKey;

/// How a fired event reaches the handler.
#[derive(Clone, Debug)]
pub enum Delivery {
    /// The handler takes the registered event type itself.
    Exact,
    /// The handler takes an ancestor; the event is projected first.
    Upcast(Ancestor),
}

/// A contract that passed validation against a specific event type.
#[derive(Clone, Debug)]
pub struct ValidatedContract {
    capability: CapabilityId,
    event: EventType,
    handler: &'static str,
    param: TypeKey,
    delivery: Delivery,
}

impl ValidatedContract {
    /// The validated capability.
    #[must_use]
    pub fn capability(&self) -> CapabilityId {
        self.capability
    }

    /// The event type the capability is bound to.
    #[must_use]
    pub fn event(&self) -> &EventType {
        &self.event
    }

    /// Name of the single handling operation.
    #[must_use]
    pub fn handler(&self) -> &'static str {
        self.handler
    }

    /// Declared parameter type of the handling operation.
    #[must_use]
    pub fn param(&self) -> TypeKey {
        self.param
    }

    /// How events are presented to the handler.
    #[must_use]
    pub fn delivery(&self) -> &Delivery {
        &self.delivery
    }
}

/// Validates `contract` against `event`.
///
/// # Errors
///
/// - `ContractError::NoHandlerFound` - no handling operation declared
/// - `ContractError::DuplicateHandler` - more than one handling operation
/// - `ContractError::IncompatibleHandler` - wrong arity or parameter type
pub fn validate(contract: &Contract, event: &EventType) -> Result<ValidatedContract, ContractError> {
    let capability = contract.id();

    let handler = match contract.handlers() {
        [] => return Err(ContractError::NoHandlerFound { capability }),
        [single] => single,
        many => {
            return Err(ContractError::DuplicateHandler {
                capability,
                handlers: many.iter().map(|h| h.name()).collect(),
            })
        }
    };

    let incompatible = |reason| ContractError::IncompatibleHandler {
        capability,
        handler: handler.name(),
        event: event.key(),
        reason,
    };

    let param = match handler.params() {
        [param] => param,
        params => {
            return Err(incompatible(Incompatibility::Arity {
                found: params.len(),
            }))
        }
    };

    let param = match param {
        ParamType::Event(param) => param.key(),
        ParamType::Marker => return Err(incompatible(Incompatibility::BareMarker)),
        ParamType::Value(key) => {
            return Err(incompatible(Incompatibility::NotAnEvent { param: *key }))
        }
    };

    let delivery = if param == event.key() {
        Delivery::Exact
    } else if let Some(ancestor) = event.lineage().find(param) {
        Delivery::Upcast(ancestor.clone())
    } else {
        return Err(incompatible(Incompatibility::Unrelated {
            param,
            event: event.key(),
        }));
    };

    Ok(ValidatedContract {
        capability,
        event: event.clone(),
        handler: handler.name(),
        param,
        delivery,
    })
}
