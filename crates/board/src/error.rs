//! Error types for the board

use board_contract::{ContractError, TypeKey};
use std::fmt;
use thiserror::Error;

/// Errors surfaced by board operations.
#[derive(Debug, Error)]
pub enum BoardError {
    /// A required argument was absent.
    #[error("required argument `{argument}` is absent")]
    NullArgument { argument: &'static str },

    /// The capability contract was rejected by the validator.
    #[error(transparent)]
    Contract(#[from] ContractError),

    /// The capability or the event type is already bound.
    #[error("cannot bind {capability} to {event}: {conflict}")]
    DuplicateRegistration {
        capability: TypeKey,
        event: TypeKey,
        conflict: RegistrationConflict,
    },

    /// The listener satisfies no registered capability.
    #[error("listener {listener} implements no registered capability")]
    NoMatchingRegistration { listener: TypeKey },

    /// An event with no bound capability was fired while unbound events are rejected.
    #[error("no capability is bound to event {event}")]
    UnboundEvent { event: &'static str },

    /// A bound event could not be projected onto the handler's parameter.
    #[error("event {event} cannot be presented as {param}")]
    Undeliverable { event: &'static str, param: TypeKey },

    /// A listener's handler failed. Display and source are the handler's own.
    #[error(transparent)]
    Handler(anyhow::Error),
}

/// Which side of a registration is already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationConflict {
    /// The capability is already bound to this event type.
    CapabilityBound { to: TypeKey },
    /// The event type is already bound to this capability.
    EventBound { to: TypeKey },
}

impl fmt::Display for RegistrationConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapabilityBound { to } => write!(f, "capability is already bound to {to}"),
            Self::EventBound { to } => write!(f, "event is already bound to {to}"),
        }
    }
}

/// Flat classification of [`BoardError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NullArgument,
    NoHandlerFound,
    DuplicateHandler,
    IncompatibleHandler,
    DuplicateRegistration,
    NoMatchingRegistration,
    UnboundEvent,
    Undeliverable,
    Handler,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::NullArgument => "null argument",
            Self::NoHandlerFound => "no handler found",
            Self::DuplicateHandler => "duplicate handler",
            Self::IncompatibleHandler => "incompatible handler",
            Self::DuplicateRegistration => "duplicate registration",
            Self::NoMatchingRegistration => "no matching registration",
            Self::UnboundEvent => "unbound event",
            Self::Undeliverable => "undeliverable event",
            Self::Handler => "handler failure",
        };
        f.write_str(s)
    }
}

impl BoardError {
    /// Classifies the error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NullArgument { .. } => ErrorKind::NullArgument,
            Self::Contract(ContractError::NoHandlerFound { .. }) => ErrorKind::NoHandlerFound,
            Self::Contract(ContractError::DuplicateHandler { .. }) => ErrorKind::DuplicateHandler,
            Self::Contract(ContractError::IncompatibleHandler { .. }) => {
                ErrorKind::IncompatibleHandler
            }
            Self::DuplicateRegistration { .. } => ErrorKind::DuplicateRegistration,
            Self::NoMatchingRegistration { .. } => ErrorKind::NoMatchingRegistration,
            Self::UnboundEvent { .. } => ErrorKind::UnboundEvent,
            Self::Undeliverable { .. } => ErrorKind::Undeliverable,
            Self::Handler(_) => ErrorKind::Handler,
        }
    }

    /// The handler failure, if this error came from a listener.
    #[must_use]
    pub fn handler_error(&self) -> Option<&anyhow::Error> {
        match self {
            Self::Handler(err) => Some(err),
            _ => None,
        }
    }

    /// Unwraps into the handler failure, returning `self` otherwise.
    pub fn into_handler_error(self) -> Result<anyhow::Error, Self> {
        match self {
            Self::Handler(err) => Ok(err),
            other => Err(other),
        }
    }
}
