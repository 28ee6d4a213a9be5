//! # Events
//!
//! The event marker convention and event lineage.
//!
//! An event is any `Send + Sync + 'static` type implementing [`Event`]. Rust
//! has no subclassing, so an event "hierarchy" is expressed by composition:
//! a refined event embeds its parent and declares how to reach it.
//!
//! ```rust,ignore
//! struct PaymentEvent { amount: u64 }
//! impl Event for PaymentEvent {}
//!
//! struct PaymentFailed { payment: PaymentEvent, reason: String }
//! impl Event for PaymentFailed {
//!     fn lineage() -> Lineage {
//!         Lineage::refines::<Self, PaymentEvent>(|failed| &failed.payment)
//!     }
//! }
//! ```
//!
//! A handler declared for `PaymentEvent` is then compatible with a
//! `PaymentFailed` registration and receives the embedded parent.

use crate::key::TypeKey;
use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

/// Erased view of a concrete value.
///
/// Blanket-implemented for every `Any + Send + Sync` type so that a
/// `&dyn Event` can still report and expose its concrete runtime type.
pub trait AsAny: Any + Send + Sync {
    /// The value as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;

    /// Name of the concrete runtime type.
    fn runtime_type_name(&self) -> &'static str;
}

impl<T: Any + Send + Sync> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn runtime_type_name(&self) -> &'static str {
        type_name::<T>()
    }
}

/// Marker for types that can be fired through a board.
pub trait Event: AsAny {
    /// Parent categories this event refines, nearest first.
    fn lineage() -> Lineage
    where
        Self: Sized,
    {
        Lineage::root()
    }
}

/// Projects an erased child event onto one of its ancestors.
pub type Upcast = Arc<dyn for<'a> Fn(&'a dyn Any) -> Option<&'a dyn Any> + Send + Sync>;

fn upcaster<F>(f: F) -> Upcast
where
    F: for<'a> Fn(&'a dyn Any) -> Option<&'a dyn Any> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// One ancestor in an event's lineage.
#[derive(Clone)]
pub struct Ancestor {
    key: TypeKey,
    upcast: Upcast,
}

impl Ancestor {
    /// The ancestor event type.
    #[must_use]
    pub fn key(&self) -> TypeKey {
        self.key
    }

    /// Views `event` (an instance of the descendant) as this ancestor.
    ///
    /// Returns `None` if `event` is not an instance of the descendant this
    /// ancestor was declared for.
    pub fn project<'a>(&self, event: &'a dyn Any) -> Option<&'a dyn Any> {
        (self.upcast)(event)
    }
}

impl fmt::Debug for Ancestor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Ancestor").field(&self.key).finish()
    }
}

/// Ordered ancestors of an event type, nearest first.
#[derive(Clone, Default, Debug)]
pub struct Lineage {
    ancestors: Vec<Ancestor>,
}

impl Lineage {
    /// A lineage with no ancestors.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Declares that `E` refines `P`, reachable through `parent`.
    ///
    /// `P`'s own lineage is appended, so grandparents are ancestors of `E`.
    /// Lineages must be acyclic: `P` (or any of its ancestors) refining `E`
    /// recurses without bound.
    #[must_use]
    pub fn refines<E: Event, P: Event>(parent: fn(&E) -> &P) -> Self {
        let direct = upcaster(move |event| {
            event
                .downcast_ref::<E>()
                .map(|child| parent(child) as &dyn Any)
        });

        let mut ancestors = vec![Ancestor {
            key: TypeKey::of::<P>(),
            upcast: Arc::clone(&direct),
        }];

        for further in P::lineage().ancestors {
            let step = Arc::clone(&direct);
            let next = further.upcast;
            ancestors.push(Ancestor {
                key: further.key,
                upcast: upcaster(move |event| step(event).and_then(|parent| next(parent))),
            });
        }

        Self { ancestors }
    }

    /// Ancestors, nearest first.
    #[must_use]
    pub fn ancestors(&self) -> &[Ancestor] {
        &self.ancestors
    }

    /// Finds the ancestor with the given key.
    #[must_use]
    pub fn find(&self, key: TypeKey) -> Option<&Ancestor> {
        self.ancestors.iter().find(|ancestor| ancestor.key == key)
    }

    /// Whether the lineage is empty.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.ancestors.is_empty()
    }
}

/// Descriptor of a concrete event type: its key plus its lineage.
#[derive(Clone)]
pub struct EventType {
    key: TypeKey,
    lineage: Lineage,
}

impl EventType {
    /// Descriptor for `E`.
    #[must_use]
    pub fn of<E: Event>() -> Self {
        Self {
            key: TypeKey::of::<E>(),
            lineage: E::lineage(),
        }
    }

    /// Type key of the event.
    #[must_use]
    pub fn key(&self) -> TypeKey {
        self.key
    }

    /// Fully qualified type name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.key.name()
    }

    /// Declared ancestors.
    #[must_use]
    pub fn lineage(&self) -> &Lineage {
        &self.lineage
    }

    /// True if `key` is this event type or one of its ancestors.
    #[must_use]
    pub fn is_assignable_to(&self, key: TypeKey) -> bool {
        self.key == key || self.lineage.find(key).is_some()
    }
}

impl PartialEq for EventType {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for EventType {}

impl fmt::Debug for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ancestors: Vec<_> = self
            .lineage
            .ancestors
            .iter()
            .map(|ancestor| ancestor.key.short_name())
            .collect();
        f.debug_struct("EventType")
            .field("name", &self.key.short_name())
            .field("ancestors", &ancestors)
            .finish()
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.key, f)
    }
}
