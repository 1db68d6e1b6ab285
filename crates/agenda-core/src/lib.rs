//! Interval-indexed event store for the Agenda workspace.
//!
//! An [`EventStore`] owns a sequence of [`Event`] values. Once the sequence
//! is sorted by start time, a lower-bound binary search over it answers
//! three interval queries: what is happening at a point in time, whether a
//! proposed span conflicts with an existing event, and where the next free
//! slot of a given length is.
//!
//! # Modules
//!
//! - [`store`] -- [`EventStore`]: create, find, shuffle, sort, and query.
//! - [`sort`] -- Insertion, bubble, and hybrid quicksort by start time.
//! - [`locator`] -- Lower-bound binary search over a sorted slice.
//! - [`query`] -- Occupancy, conflict, and free-slot queries.
//! - [`loader`] -- Bulk loading from comma-separated text.
//! - [`config`] -- Configuration loading from `agenda-config.yaml`.
//!
//! # Usage
//!
//! ```
//! use agenda_core::EventStore;
//!
//! let mut store = EventStore::new();
//! store.create("Review", 10, 5, "work", None);
//! store.create("Standup", 0, 5, "work", None);
//!
//! // Queries assume start-time order.
//! store.quick_sort();
//!
//! assert_eq!(store.event_happening(12).map(|e| e.name()), Some("Review"));
//! assert!(!store.check_for_conflicts(15, 3));
//! assert_eq!(store.find_free_slot(0, 20, 4), Some(5));
//! assert_eq!(store.find_free_slot(0, 20, 6), None);
//! ```
//!
//! [`Event`]: agenda_types::Event

pub mod config;
pub mod loader;
pub mod locator;
pub mod query;
pub mod sort;
pub mod store;

// Re-export primary types at crate root.
pub use agenda_types::Event;
pub use config::{AgendaConfig, ConfigError};
pub use loader::{InvalidNumberPolicy, LoadError, LoadReport};
pub use sort::{ParseStrategyError, SortStrategy, Sorter};
pub use store::EventStore;
