//! Interval queries over a start-time-sorted event slice.
//!
//! All three queries assume the slice is sorted by ascending start time.
//!
//! - [`event_happening`] uses closed spans `[start, start + duration]`.
//! - [`check_for_conflicts`] and [`find_free_slot`] use half-open spans
//!   `[start, start + duration)`.
//!
//! The occupancy and conflict checks only look at the locator's candidate
//! and its immediate predecessor. That is exact for sorted, non-overlapping
//! events. With overlapping events, a third event that also matches can be
//! missed.

use agenda_types::Event;

use crate::locator::lower_bound;

/// Return the event occurring at `time`, if any.
///
/// Checks the first event starting at or after `time`, then the event just
/// before it, and returns the first of the two whose closed span contains
/// `time`.
pub fn event_happening(events: &[Event], time: i64) -> Option<&Event> {
    let idx = lower_bound(events, time);
    candidates(events, idx).find(|event| event.covers(time))
}

/// Whether the proposed span `[time, time + duration)` overlaps an event.
///
/// Touching spans do not conflict: with an event over `[10, 15)`, a
/// proposal starting at 15 is free.
pub fn check_for_conflicts(events: &[Event], time: i64, duration: i64) -> bool {
    let idx = lower_bound(events, time);
    candidates(events, idx).any(|event| event.overlaps(time, duration))
}

/// Find the earliest start of a free slot of `requested_duration` within
/// `[slot_start, slot_end]`.
///
/// Walks the events once with a cursor starting at `slot_start`. Events that
/// end at or before the cursor are skipped. A gap before the next event that
/// fits the request wins. Otherwise the cursor jumps to that event's end.
/// After the walk, the tail between the cursor and `slot_end` is tried.
///
/// Returns `None` when no slot fits. Events that start before
/// `slot_start` are not clipped. They only push the cursor forward.
pub fn find_free_slot(
    events: &[Event],
    slot_start: i64,
    slot_end: i64,
    requested_duration: i64,
) -> Option<i64> {
    if slot_end.saturating_sub(slot_start) < requested_duration {
        return None;
    }

    let mut current = slot_start;
    for event in events {
        if event.end_time() <= current {
            continue;
        }
        if event.start_time().saturating_sub(current) >= requested_duration {
            return Some(current);
        }
        current = event.end_time();
        if current.saturating_add(requested_duration) > slot_end {
            return None;
        }
    }

    (current.saturating_add(requested_duration) <= slot_end).then_some(current)
}

/// The locator candidate at `idx`, followed by its predecessor.
fn candidates(events: &[Event], idx: usize) -> impl Iterator<Item = &Event> {
    events
        .get(idx)
        .into_iter()
        .chain(idx.checked_sub(1).and_then(|prev| events.get(prev)))
}
