//! The board service
//!
//! Owns the binding table and the subscriber sets behind a single
//! `parking_lot::RwLock`.
//!
//! ## Locking
//!
//! - `register`, `add_listener`, `remove_listener` take the write lock for
//!   the whole mutation.
//! - `fire` takes the read lock only long enough to resolve the binding and
//!   clone the subscriber snapshot. Handlers run with no lock held, so they
//!   may call back into the board.

use crate::domain::{BindingTable, BoardConfig, Subscriber, SubscriberSet};
use crate::error::BoardError;
use crate::metrics::BoardMetrics;
use crate::ports::{ErasedHandler, HandlerTable, Listener, ListenerId, ListenerOwner};
use board_contract::{
    validate, AsAny, Capability, CapabilityId, Contract, Delivery, Event, EventType, TypeKey,
};
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace, warn};

#[derive(Default, Debug)]
struct Registry {
    bindings: BindingTable,
    subscribers: HashMap<CapabilityId, SubscriberSet>,
}

/// In-process publish/subscribe registry.
///
/// Share it by reference or behind an `Arc`; every operation takes `&self`.
#[derive(Debug, Default)]
pub struct Board {
    registry: RwLock<Registry>,
    config: BoardConfig,
    metrics: BoardMetrics,
}

impl Board {
    /// Board with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Board with an explicit configuration.
    #[must_use]
    pub fn with_config(config: BoardConfig) -> Self {
        Self {
            registry: RwLock::new(Registry::default()),
            config,
            metrics: BoardMetrics::new(),
        }
    }

    /// Binds capability `C` to event type `E`.
    ///
    /// # Errors
    ///
    /// - `BoardError::DuplicateRegistration` if `C` or `E` is already bound.
    /// - `BoardError::Contract` if `C`'s contract cannot handle `E`.
    pub fn register<C, E>(&self) -> Result<(), BoardError>
    where
        C: Capability + ?Sized,
        E: Event,
    {
        self.register_contract(C::contract(), EventType::of::<E>())
    }

    /// Binds a capability, given by its contract, to an event type.
    ///
    /// # Errors
    ///
    /// - `BoardError::NullArgument` if either descriptor is absent, the
    ///   capability being checked first.
    /// - `BoardError::DuplicateRegistration` if either side is already bound.
    /// - `BoardError::Contract` if the contract cannot handle the event type.
    pub fn register_contract(
        &self,
        contract: impl Into<Option<Contract>>,
        event_type: impl Into<Option<EventType>>,
    ) -> Result<(), BoardError> {
        let contract = contract.into().ok_or(BoardError::NullArgument {
            argument: "capability",
        })?;
        let event_type = event_type.into().ok_or(BoardError::NullArgument {
            argument: "event_type",
        })?;

        let mut registry = self.registry.write();
        let Registry {
            bindings,
            subscribers,
        } = &mut *registry;

        // A taken side wins over an invalid contract.
        bindings.ensure_unbound(contract.id(), event_type.key())?;
        let validated = validate(&contract, &event_type)?;
        let binding = bindings.insert(validated)?;
        let capability = binding.capability();
        subscribers.entry(capability).or_default();

        debug!(
            capability = %capability,
            event = %event_type,
            handler = binding.handler(),
            param = %binding.param(),
            "Registered capability"
        );
        drop(registry);

        self.metrics.record_binding();
        Ok(())
    }

    /// Subscribes a listener to every registered capability it implements.
    ///
    /// A capability matches when the listener bound a handler for it whose
    /// parameter is the registered handler parameter. Adding a listener that
    /// is already subscribed is a no-op for that capability.
    ///
    /// Subscribers are identified by their `Arc` allocation. The board holds
    /// a strong reference to every subscribed listener until it is removed.
    ///
    /// Returns the number of matching capabilities.
    ///
    /// # Errors
    ///
    /// - `BoardError::NullArgument` if `listener` is absent.
    /// - `BoardError::NoMatchingRegistration` if no registered capability
    ///   matches. Nothing is subscribed in that case.
    pub fn add_listener<'a, L>(
        &self,
        listener: impl Into<Option<&'a Arc<L>>>,
    ) -> Result<usize, BoardError>
    where
        L: Listener + ?Sized,
    {
        let listener = listener.into().ok_or(BoardError::NullArgument {
            argument: "listener",
        })?;
        let id = ListenerId::of(listener);
        let listener_type = TypeKey::of::<L>();

        let mut table = HandlerTable::new();
        Arc::clone(listener).handlers(&mut table);

        let mut registry = self.registry.write();
        let Registry {
            bindings,
            subscribers,
        } = &mut *registry;

        let matching: Vec<(CapabilityId, ErasedHandler)> = table
            .iter()
            .filter(|entry| {
                bindings
                    .get(&entry.capability())
                    .is_some_and(|binding| binding.param() == entry.param())
            })
            .map(|entry| (entry.capability(), Arc::clone(entry.handler())))
            .collect();

        if matching.is_empty() {
            debug!(
                listener = %listener_type,
                declared = table.len(),
                "Listener matches no registered capability"
            );
            return Err(BoardError::NoMatchingRegistration {
                listener: listener_type,
            });
        }

        let mut added = 0;
        for (capability, handler) in &matching {
            let owner: ListenerOwner = Arc::new(Arc::clone(listener));
            let subscriber = Subscriber::new(id, listener_type, Arc::clone(handler), owner);
            if subscribers.entry(*capability).or_default().insert(subscriber) {
                added += 1;
            }
        }
        drop(registry);

        debug!(
            listener = %listener_type,
            capabilities = matching.len(),
            added,
            "Listener added"
        );
        if added > 0 {
            self.metrics.record_listener_added();
        }
        Ok(matching.len())
    }

    /// Unsubscribes a listener from every capability.
    ///
    /// Returns `true` if it was subscribed to at least one.
    ///
    /// # Errors
    ///
    /// `BoardError::NullArgument` if `listener` is absent.
    pub fn remove_listener<'a, L>(
        &self,
        listener: impl Into<Option<&'a Arc<L>>>,
    ) -> Result<bool, BoardError>
    where
        L: Listener + ?Sized,
    {
        let listener = listener.into().ok_or(BoardError::NullArgument {
            argument: "listener",
        })?;
        let id = ListenerId::of(listener);

        let removed = self
            .registry
            .write()
            .subscribers
            .values_mut()
            .map(|set| set.remove(id))
            .filter(|removed| *removed)
            .count();

        debug!(
            listener = %TypeKey::of::<L>(),
            capabilities = removed,
            "Listener removed"
        );
        if removed > 0 {
            self.metrics.record_listener_removed();
        }
        Ok(removed > 0)
    }

    /// Delivers `event` to every listener subscribed to the capability bound
    /// to `E`, in subscription order.
    ///
    /// Returns the number of listeners invoked.
    ///
    /// # Errors
    ///
    /// - `BoardError::NullArgument` if `event` is absent.
    /// - `BoardError::UnboundEvent` if nothing is bound to `E` and the board
    ///   rejects unbound events.
    /// - `BoardError::Handler` with the first handler failure. Later listeners
    ///   are not invoked.
    pub fn fire<'e, E: Event>(&self, event: impl Into<Option<&'e E>>) -> Result<usize, BoardError> {
        let event = event.into().ok_or(BoardError::NullArgument { argument: "event" })?;
        let erased: &dyn Any = event;
        self.dispatch(erased, TypeId::of::<E>(), std::any::type_name::<E>())
    }

    /// Like [`Board::fire`], for an event whose type is only known at runtime.
    ///
    /// # Errors
    ///
    /// Same as [`Board::fire`].
    pub fn fire_dyn(&self, event: Option<&dyn Event>) -> Result<usize, BoardError> {
        let event = event.ok_or(BoardError::NullArgument { argument: "event" })?;
        let erased: &dyn Any = AsAny::as_any(event);
        self.dispatch(erased, Any::type_id(erased), event.runtime_type_name())
    }

    fn dispatch(
        &self,
        event: &dyn Any,
        event_id: TypeId,
        event_name: &'static str,
    ) -> Result<usize, BoardError> {
        let resolved = {
            let registry = self.registry.read();
            match registry.bindings.for_event(event_id) {
                Some(binding) => {
                    // Bindings are looked up by the event's exact runtime type,
                    // so projection only fails on a corrupted lineage.
                    let payload = binding.payload(event).ok_or(BoardError::Undeliverable {
                        event: event_name,
                        param: binding.param(),
                    })?;
                    let snapshot = registry
                        .subscribers
                        .get(&binding.capability())
                        .map(SubscriberSet::snapshot)
                        .unwrap_or_default();
                    let upcast = matches!(binding.delivery(), Delivery::Upcast(_));
                    Some((binding.capability(), payload, snapshot, upcast))
                }
                None => None,
            }
        };

        self.metrics.record_fire(resolved.is_some());

        let Some((capability, payload, subscribers, upcast)) = resolved else {
            debug!(event = event_name, "No capability bound to fired event");
            if self.config.rejects_unbound_events() {
                return Err(BoardError::UnboundEvent { event: event_name });
            }
            return Ok(0);
        };

        let mut delivered = 0;
        for subscriber in subscribers.iter() {
            if let Err(err) = (subscriber.handler())(payload) {
                warn!(
                    capability = %capability,
                    event = event_name,
                    listener = %subscriber.listener(),
                    error = %err,
                    "Handler failed; aborting fan-out"
                );
                self.metrics.record_dispatch(delivered, true);
                return Err(BoardError::Handler(err));
            }
            delivered += 1;
        }

        trace!(
            capability = %capability,
            event = event_name,
            upcast,
            listeners = delivered,
            "Event fired"
        );
        self.metrics.record_dispatch(delivered, false);
        Ok(delivered)
    }

    /// Whether a capability is bound to `E`.
    #[must_use]
    pub fn is_registered<E: Event>(&self) -> bool {
        self.capability_for::<E>().is_some()
    }

    /// The capability bound to `E`, if any.
    #[must_use]
    pub fn capability_for<E: Event>(&self) -> Option<CapabilityId> {
        self.registry
            .read()
            .bindings
            .for_event(TypeId::of::<E>())
            .map(|binding| binding.capability())
    }

    /// Number of bindings.
    #[must_use]
    pub fn binding_count(&self) -> usize {
        self.registry.read().bindings.len()
    }

    /// Number of listeners subscribed to capability `C`.
    #[must_use]
    pub fn listener_count<C: Capability + ?Sized>(&self) -> usize {
        self.registry
            .read()
            .subscribers
            .get(&C::id())
            .map_or(0, SubscriberSet::len)
    }

    /// Whether `listener` is subscribed to any capability.
    #[must_use]
    pub fn is_subscribed<L: Listener + ?Sized>(&self, listener: &Arc<L>) -> bool {
        let id = ListenerId::of(listener);
        self.registry
            .read()
            .subscribers
            .values()
            .any(|set| set.contains(id))
    }

    /// Configuration in effect.
    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Operation counters.
    #[must_use]
    pub fn metrics(&self) -> &BoardMetrics {
        &self.metrics
    }
}
