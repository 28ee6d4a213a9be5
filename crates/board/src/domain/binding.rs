//! Capability ↔ event bindings
//!
//! ## Invariants
//!
//! - A capability is bound to at most one event type.
//! - An event type is bound to at most one capability.
//! - Bindings are append-only: never replaced, never removed.

use crate::error::{BoardError, RegistrationConflict};
use board_contract::{CapabilityId, Delivery, TypeKey, ValidatedContract};
use std::any::{Any, TypeId};
use std::collections::HashMap;

/// A recorded capability → event binding.
#[derive(Clone, Debug)]
pub struct Binding {
    contract: ValidatedContract,
}

impl Binding {
    /// The bound capability.
    #[must_use]
    pub fn capability(&self) -> CapabilityId {
        self.contract.capability()
    }

    /// The bound event type.
    #[must_use]
    pub fn event(&self) -> TypeKey {
        self.contract.event().key()
    }

    /// Name of the capability's handling operation.
    #[must_use]
    pub fn handler(&self) -> &'static str {
        self.contract.handler()
    }

    /// Declared parameter type of the handling operation.
    #[must_use]
    pub fn param(&self) -> TypeKey {
        self.contract.param()
    }

    /// How fired events reach the handler.
    #[must_use]
    pub fn delivery(&self) -> &Delivery {
        self.contract.delivery()
    }

    /// Presents a fired event the way the handler expects it.
    ///
    /// Returns `None` if `event` is not an instance of the bound event type.
    pub fn payload<'a>(&self, event: &'a dyn Any) -> Option<&'a dyn Any> {
        match self.contract.delivery() {
            Delivery::Exact => Some(event),
            Delivery::Upcast(ancestor) => ancestor.project(event),
        }
    }
}

/// Both directions of the binding relation.
#[derive(Default, Debug)]
pub struct BindingTable {
    by_capability: HashMap<CapabilityId, Binding>,
    by_event: HashMap<TypeId, CapabilityId>,
}

impl BindingTable {
    /// Empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks that neither `capability` nor `event` is bound yet.
    ///
    /// # Errors
    ///
    /// `BoardError::DuplicateRegistration` naming the side already taken.
    /// The capability side is checked first.
    pub fn ensure_unbound(&self, capability: CapabilityId, event: TypeKey) -> Result<(), BoardError> {
        if let Some(existing) = self.by_capability.get(&capability) {
            return Err(BoardError::DuplicateRegistration {
                capability,
                event,
                conflict: RegistrationConflict::CapabilityBound {
                    to: existing.event(),
                },
            });
        }
        if let Some(owner) = self.by_event.get(&event.id()) {
            return Err(BoardError::DuplicateRegistration {
                capability,
                event,
                conflict: RegistrationConflict::EventBound { to: *owner },
            });
        }
        Ok(())
    }

    /// Records a validated contract.
    ///
    /// # Errors
    ///
    /// `BoardError::DuplicateRegistration` if either side is already bound.
    pub fn insert(&mut self, contract: ValidatedContract) -> Result<&Binding, BoardError> {
        let capability = contract.capability();
        let event = contract.event().key();
        self.ensure_unbound(capability, event)?;

        self.by_event.insert(event.id(), capability);
        let binding = self
            .by_capability
            .entry(capability)
            .or_insert(Binding { contract });
        Ok(&*binding)
    }

    /// Binding of a capability.
    #[must_use]
    pub fn get(&self, capability: &CapabilityId) -> Option<&Binding> {
        self.by_capability.get(capability)
    }

    /// Binding for an event's exact runtime type.
    #[must_use]
    pub fn for_event(&self, event: TypeId) -> Option<&Binding> {
        self.by_event
            .get(&event)
            .and_then(|capability| self.by_capability.get(capability))
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_capability.len()
    }

    /// Whether no binding exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_capability.is_empty()
    }
}
