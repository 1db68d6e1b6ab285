//! The event store: an owned, ordered sequence of events.
//!
//! The store keeps events in insertion order (or load order) until one of
//! the sorting strategies is applied. Interval queries ([`locate`],
//! [`event_happening`], [`check_for_conflicts`], [`find_free_slot`]) assume
//! the store is sorted by start time. That is the caller's responsibility
//! and is never checked; [`is_sorted`] is available to verify it.
//!
//! [`locate`]: EventStore::locate
//! [`event_happening`]: EventStore::event_happening
//! [`check_for_conflicts`]: EventStore::check_for_conflicts
//! [`find_free_slot`]: EventStore::find_free_slot
//! [`is_sorted`]: EventStore::is_sorted

use std::io::BufRead;
use std::path::Path;

use agenda_types::Event;
use rand::Rng;
use tracing::debug;

use crate::loader::{self, InvalidNumberPolicy, LoadError, LoadReport};
use crate::sort::{self, DEFAULT_QUICKSORT_THRESHOLD, Sorter};
use crate::{locator, query};

/// An in-memory, single-owner collection of events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    /// Create an empty store.
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Construct an event and insert it.
    ///
    /// With `Some(position)` where `position <= len()`, the event is inserted
    /// there and later events shift right. Otherwise it is appended. The
    /// numeric fields are accepted as-is. Returns the index the event landed
    /// at.
    pub fn create(
        &mut self,
        name: impl Into<String>,
        start_time: i64,
        duration: i64,
        category: impl Into<String>,
        position: Option<usize>,
    ) -> usize {
        let event = Event::new(name, start_time, duration, category);
        let index = match position {
            Some(position) if position <= self.events.len() => {
                self.events.insert(position, event);
                position
            }
            _ => {
                self.events.push(event);
                self.events.len().saturating_sub(1)
            }
        };
        debug!(index, len = self.events.len(), "event created");
        index
    }

    /// Append an already constructed event.
    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Return the events in their current order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Consume the store, returning the underlying events.
    pub fn into_events(self) -> Vec<Event> {
        self.events
    }

    /// Return the number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the store holds no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Iterate over the events in their current order.
    pub fn iter(&self) -> std::slice::Iter<'_, Event> {
        self.events.iter()
    }

    /// Shuffle the events in place with the Fisher-Yates algorithm.
    ///
    /// Every permutation is equally likely given a uniform `rng`. Pass a
    /// seeded generator for a reproducible order.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        for i in (1..self.events.len()).rev() {
            let j = rng.random_range(0..=i);
            self.events.swap(i, j);
        }
        debug!(len = self.events.len(), "events shuffled");
    }

    /// Return the first event named exactly `name` (case-sensitive).
    pub fn find_by_name(&self, name: &str) -> Option<&Event> {
        self.events.iter().find(|event| event.name() == name)
    }

    /// Sort the events by start time with the given sorter.
    pub fn sort(&mut self, sorter: &Sorter) {
        sorter.sort(&mut self.events);
    }

    /// Sort the events with the stable insertion sort.
    pub fn insertion_sort(&mut self) {
        sort::insertion_sort(&mut self.events);
    }

    /// Sort the events with the stable bubble sort.
    pub fn bubble_sort(&mut self) {
        sort::bubble_sort(&mut self.events);
    }

    /// Sort the events with the hybrid quicksort and the default threshold.
    pub fn quick_sort(&mut self) {
        sort::quick_sort(&mut self.events, DEFAULT_QUICKSORT_THRESHOLD);
    }

    /// Whether the events are in non-decreasing start-time order.
    pub fn is_sorted(&self) -> bool {
        self.events
            .is_sorted_by(|a, b| a.start_time() <= b.start_time())
    }

    /// Index of the first event starting at or after `start_time`, or `len()`.
    ///
    /// Requires the store to be sorted.
    pub fn locate(&self, start_time: i64) -> usize {
        locator::lower_bound(&self.events, start_time)
    }

    /// The event occurring at `time` (closed spans), if any.
    ///
    /// Requires the store to be sorted.
    pub fn event_happening(&self, time: i64) -> Option<&Event> {
        query::event_happening(&self.events, time)
    }

    /// Whether `[time, time + duration)` overlaps an event.
    ///
    /// Requires the store to be sorted.
    pub fn check_for_conflicts(&self, time: i64, duration: i64) -> bool {
        query::check_for_conflicts(&self.events, time, duration)
    }

    /// Earliest start of a free slot of `requested_duration` inside
    /// `[slot_start, slot_end]`, or `None`.
    ///
    /// Requires the store to be sorted.
    pub fn find_free_slot(
        &self,
        slot_start: i64,
        slot_end: i64,
        requested_duration: i64,
    ) -> Option<i64> {
        query::find_free_slot(&self.events, slot_start, slot_end, requested_duration)
    }

    /// Append events from the file at `path`.
    ///
    /// # Errors
    ///
    /// See [`loader::load_from_path`]. A missing file leaves the store
    /// unchanged.
    pub fn load_from_file(
        &mut self,
        path: &Path,
        policy: InvalidNumberPolicy,
    ) -> Result<LoadReport, LoadError> {
        loader::load_from_path(path, policy, &mut self.events)
    }

    /// Append events read from `reader`.
    ///
    /// # Errors
    ///
    /// See [`loader::load_from_reader`].
    pub fn load_from_reader<R: BufRead>(
        &mut self,
        reader: R,
        policy: InvalidNumberPolicy,
    ) -> Result<LoadReport, LoadError> {
        loader::load_from_reader(reader, policy, &mut self.events)
    }
}

impl FromIterator<Event> for EventStore {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

impl Extend<Event> for EventStore {
    fn extend<I: IntoIterator<Item = Event>>(&mut self, iter: I) {
        self.events.extend(iter);
    }
}

impl<'a> IntoIterator for &'a EventStore {
    type Item = &'a Event;
    type IntoIter = std::slice::Iter<'a, Event>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
