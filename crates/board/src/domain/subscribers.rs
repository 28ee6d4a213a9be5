//! Subscriber sets
//!
//! Ordered, duplicate-free listener sets, one per bound capability.
//!
//! The set is copy-on-write: `snapshot()` hands out the current `Arc`, and
//! any later mutation clones the vector first. An in-flight dispatch
//! therefore iterates a frozen view while handlers add or remove listeners.

use crate::ports::{ErasedHandler, ListenerId, ListenerOwner};
use board_contract::TypeKey;
use std::fmt;
use std::sync::Arc;

/// A subscribed listener's handler for one capability.
///
/// Holds the listener itself, so its allocation, and therefore its
/// [`ListenerId`], cannot be reused while it is subscribed.
#[derive(Clone)]
pub struct Subscriber {
    id: ListenerId,
    listener: TypeKey,
    handler: ErasedHandler,
    _owner: ListenerOwner,
}

impl Subscriber {
    /// A subscriber entry.
    #[must_use]
    pub fn new(
        id: ListenerId,
        listener: TypeKey,
        handler: ErasedHandler,
        owner: ListenerOwner,
    ) -> Self {
        Self {
            id,
            listener,
            handler,
            _owner: owner,
        }
    }

    /// Identity of the listener instance.
    #[must_use]
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Concrete type of the listener.
    #[must_use]
    pub fn listener(&self) -> TypeKey {
        self.listener
    }

    /// Handler bound by the listener for this capability.
    #[must_use]
    pub fn handler(&self) -> &ErasedHandler {
        &self.handler
    }
}

impl fmt::Debug for Subscriber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscriber")
            .field("id", &self.id)
            .field("listener", &self.listener)
            .finish_non_exhaustive()
    }
}

/// Insertion-ordered set of subscribers.
#[derive(Clone, Default, Debug)]
pub struct SubscriberSet {
    subscribers: Arc<Vec<Subscriber>>,
}

impl SubscriberSet {
    /// Empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a subscriber unless its listener is already present.
    ///
    /// Returns `true` if it was added.
    pub fn insert(&mut self, subscriber: Subscriber) -> bool {
        if self.contains(subscriber.id) {
            return false;
        }
        Arc::make_mut(&mut self.subscribers).push(subscriber);
        true
    }

    /// Removes a listener. Returns `true` if it was present.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let Some(position) = self.subscribers.iter().position(|s| s.id == id) else {
            return false;
        };
        Arc::make_mut(&mut self.subscribers).remove(position);
        true
    }

    /// Whether a listener is present.
    #[must_use]
    pub fn contains(&self, id: ListenerId) -> bool {
        self.subscribers.iter().any(|s| s.id == id)
    }

    /// The current members, frozen.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Vec<Subscriber>> {
        Arc::clone(&self.subscribers)
    }

    /// Number of subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}
