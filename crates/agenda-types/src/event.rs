//! The immutable event value and its start-time ordering.
//!
//! Events live on a flat numeric timeline: `start_time` and `duration` are
//! plain integers, not wall-clock dates. Two span conventions coexist and
//! are both exposed here:
//!
//! - **Closed** `[start, start + duration]` -- used for occupancy checks.
//! - **Half-open** `[start, start + duration)` -- used for conflict and
//!   free-slot checks.
//!
//! End-time arithmetic saturates at the `i64` limits instead of wrapping.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single calendar-like event.
///
/// Events are values: they carry no identity beyond their fields, and two
/// events with identical fields are indistinguishable. There are no setters;
/// once constructed an event never changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Event {
    /// Human-readable event name. Lookups by name are exact and case-sensitive.
    name: String,
    /// Position of the event on the timeline.
    start_time: i64,
    /// Length of the event. Expected to be non-negative.
    duration: i64,
    /// Free-form category label.
    category: String,
}

impl Event {
    /// Create a new event. No validation is applied to the numeric fields.
    pub fn new(
        name: impl Into<String>,
        start_time: i64,
        duration: i64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            start_time,
            duration,
            category: category.into(),
        }
    }

    /// Return the event name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the start time.
    pub const fn start_time(&self) -> i64 {
        self.start_time
    }

    /// Return the duration.
    pub const fn duration(&self) -> i64 {
        self.duration
    }

    /// Return the category label.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Return `start_time + duration`, saturating at the `i64` limits.
    pub const fn end_time(&self) -> i64 {
        self.start_time.saturating_add(self.duration)
    }

    /// Whether `time` falls inside the closed span `[start, end]`.
    ///
    /// Both boundaries are inclusive: an event starting at 10 with duration
    /// 5 covers 10 and 15 but not 16.
    pub const fn covers(&self, time: i64) -> bool {
        self.start_time <= time && time <= self.end_time()
    }

    /// Whether the half-open span `[start, start + duration)` overlaps this
    /// event's half-open span.
    ///
    /// Spans that merely touch do not overlap.
    pub const fn overlaps(&self, start: i64, duration: i64) -> bool {
        let end = start.saturating_add(duration);
        start < self.end_time() && end > self.start_time
    }

    /// Compare two events by start time only.
    pub const fn cmp_start(&self, other: &Self) -> Ordering {
        if self.start_time < other.start_time {
            Ordering::Less
        } else if self.start_time > other.start_time {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} @ {}+{} [{}]",
            self.name, self.start_time, self.duration, self.category
        )
    }
}

/// Start-time comparator usable with `sort_by` and friends.
///
/// Ties compare equal, so stable algorithms keep the original relative order
/// of events that start together.
pub fn by_start_time(a: &Event, b: &Event) -> Ordering {
    a.cmp_start(b)
}
