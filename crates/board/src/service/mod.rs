//! Service Layer
//!
//! The `Board`: orchestrates the contract validator, the binding table and
//! the subscriber sets.

pub mod board;

pub use board::Board;
