//! Lower-bound binary search over a start-time-sorted event slice.
//!
//! The slice must already be sorted by ascending `start_time`. This is not
//! checked; an unsorted slice yields an unspecified (but in-bounds) index.

use std::cmp::Ordering;

use agenda_types::Event;

/// Return the index of the first event whose start time is `>= start_time`.
///
/// If every event starts before `start_time`, returns `events.len()`: the
/// position where such an event would be inserted. On an exact hit the
/// search walks left across any run of equal start times so duplicates
/// always resolve to their first occurrence.
#[allow(clippy::arithmetic_side_effects)] // low < high <= len, so mid + 1 <= len.
pub fn lower_bound(events: &[Event], start_time: i64) -> usize {
    let mut low = 0;
    let mut high = events.len();
    while low < high {
        let mid = low + (high - low) / 2;
        let Some(event) = events.get(mid) else {
            break;
        };
        match event.start_time().cmp(&start_time) {
            Ordering::Equal => return first_of_run(events, mid, start_time),
            Ordering::Less => low = mid + 1,
            Ordering::Greater => high = mid,
        }
    }
    low
}

/// Walk left from `idx` while the previous event shares `start_time`.
fn first_of_run(events: &[Event], mut idx: usize, start_time: i64) -> usize {
    while let Some(prev) = idx.checked_sub(1) {
        if events.get(prev).is_some_and(|e| e.start_time() == start_time) {
            idx = prev;
        } else {
            break;
        }
    }
    idx
}
