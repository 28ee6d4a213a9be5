//! Listener Port
//!
//! The convention host code implements to receive events.
//!
//! A listener declares, per capability it implements, a typed handler
//! closure. The board keeps those closures as its dispatch table; no runtime
//! reflection is involved.
//!
//! ```ignore
//! impl Listener for AuditLog {
//!     fn handlers(self: Arc<Self>, table: &mut HandlerTable) {
//!         let this = Arc::clone(&self);
//!         table.bind::<dyn PaymentListener, PaymentEvent, _>(move |event| {
//!             this.on_payment(event);
//!             Ok(())
//!         });
//!         table.bind::<dyn RefundListener, RefundEvent, _>(move |event| self.on_refund(event));
//!     }
//! }
//! ```

use board_contract::{Capability, CapabilityId, Event, TypeKey};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Outcome of a handler invocation.
pub type HandlerResult = anyhow::Result<()>;

/// Type-erased handler stored in a dispatch table.
pub type ErasedHandler = Arc<dyn Fn(&dyn Any) -> HandlerResult + Send + Sync>;

/// Strong reference a board keeps to a subscribed listener.
pub type ListenerOwner = Arc<dyn Any + Send + Sync>;

/// An object that can be subscribed to a board.
pub trait Listener: Send + Sync + 'static {
    /// Binds one handler per implemented capability into `table`.
    fn handlers(self: Arc<Self>, table: &mut HandlerTable);
}

/// Identity of a listener instance: the address of its `Arc` allocation.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

impl ListenerId {
    /// Identity of `listener`.
    #[must_use]
    pub fn of<L: ?Sized>(listener: &Arc<L>) -> Self {
        Self(Arc::as_ptr(listener).cast::<()>() as usize)
    }
}

impl fmt::Debug for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ListenerId({:#x})", self.0)
    }
}

/// One capability implementation declared by a listener.
#[derive(Clone)]
pub struct HandlerEntry {
    capability: CapabilityId,
    param: TypeKey,
    handler: ErasedHandler,
}

impl HandlerEntry {
    /// The implemented capability.
    #[must_use]
    pub fn capability(&self) -> CapabilityId {
        self.capability
    }

    /// Event type the handler accepts.
    #[must_use]
    pub fn param(&self) -> TypeKey {
        self.param
    }

    /// The erased handler.
    #[must_use]
    pub fn handler(&self) -> &ErasedHandler {
        &self.handler
    }
}

impl fmt::Debug for HandlerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerEntry")
            .field("capability", &self.capability)
            .field("param", &self.param)
            .finish_non_exhaustive()
    }
}

/// Handlers declared by one listener instance, in declaration order.
#[derive(Default, Debug)]
pub struct HandlerTable {
    entries: Vec<HandlerEntry>,
}

impl HandlerTable {
    /// Empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares that the listener implements capability `C` with a handler
    /// taking `P`.
    ///
    /// A second binding for the same capability is ignored.
    pub fn bind<C, P, F>(&mut self, handler: F) -> &mut Self
    where
        C: Capability + ?Sized,
        P: Event,
        F: Fn(&P) -> HandlerResult + Send + Sync + 'static,
    {
        let capability = C::id();
        if self.get(&capability).is_some() {
            return self;
        }

        let erased: ErasedHandler = Arc::new(move |payload: &dyn Any| {
            match payload.downcast_ref::<P>() {
                Some(event) => handler(event),
                None => Err(anyhow::anyhow!(
                    "payload delivered to {} is not a {}",
                    TypeKey::of::<C>(),
                    TypeKey::of::<P>()
                )),
            }
        });

        self.entries.push(HandlerEntry {
            capability,
            param: TypeKey::of::<P>(),
            handler: erased,
        });
        self
    }

    /// Entry for a capability.
    #[must_use]
    pub fn get(&self, capability: &CapabilityId) -> Option<&HandlerEntry> {
        self.entries
            .iter()
            .find(|entry| &entry.capability == capability)
    }

    /// All entries, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &HandlerEntry> {
        self.entries.iter()
    }

    /// Number of declared capabilities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
