//! Shared type definitions for the Agenda event store.
//!
//! This crate is the single source of truth for the value types that flow
//! between the store, the loader, and the command-line front end.
//!
//! # Modules
//!
//! - [`event`] -- The immutable [`Event`] value and its start-time ordering.

pub mod event;

// Re-export all public types at crate root for convenience.
pub use event::{Event, by_start_time};
