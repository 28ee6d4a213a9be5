//! Ports Layer
//!
//! Defines the interfaces (traits) host code implements to take part in
//! dispatch. The event and capability declaration conventions live in
//! `board-contract`.

pub mod listener;

pub use listener::{
    ErasedHandler, HandlerEntry, HandlerResult, HandlerTable, Listener, ListenerId,
    ListenerOwner,
};
