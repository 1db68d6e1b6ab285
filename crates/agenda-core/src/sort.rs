//! In-place sorting strategies for event sequences.
//!
//! Every strategy orders events by ascending `start_time` and nothing else,
//! so any of them leaves a slice in the state the [`locator`] and the
//! [`query`] functions require. They are interchangeable:
//!
//! | Strategy | Complexity | Stable |
//! |----------|------------|--------|
//! | [`insertion_sort`] | O(n^2), O(n) on nearly sorted input | yes |
//! | [`bubble_sort`] | O(n^2) always | yes |
//! | [`quick_sort`] | O(n log n) average | no |
//!
//! The quicksort is a hybrid: median-of-three pivot, Hoare partitioning, and
//! an insertion-sort finish for subranges smaller than a threshold.
//!
//! [`locator`]: crate::locator
//! [`query`]: crate::query

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use agenda_types::Event;
use serde::Deserialize;
use tracing::debug;

/// Subrange size below which the quicksort hands off to insertion sort.
pub const DEFAULT_QUICKSORT_THRESHOLD: usize = 10;

/// Which sorting algorithm to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortStrategy {
    /// Stable insertion sort.
    Insertion,
    /// Stable adjacent-swap bubble sort.
    Bubble,
    /// Hybrid median-of-three quicksort.
    #[default]
    Quick,
}

impl SortStrategy {
    /// Return the canonical lowercase name of the strategy.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Insertion => "insertion",
            Self::Bubble => "bubble",
            Self::Quick => "quick",
        }
    }
}

impl fmt::Display for SortStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a strategy name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort strategy: {name} (expected insertion, bubble, or quick)")]
pub struct ParseStrategyError {
    /// The rejected name.
    pub name: String,
}

impl FromStr for SortStrategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "insertion" => Ok(Self::Insertion),
            "bubble" => Ok(Self::Bubble),
            "quick" | "quicksort" => Ok(Self::Quick),
            other => Err(ParseStrategyError {
                name: other.to_owned(),
            }),
        }
    }
}

/// A configured sorting strategy.
///
/// Bundles the strategy with the quicksort handoff threshold so callers can
/// build one from configuration and apply it repeatedly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sorter {
    strategy: SortStrategy,
    quicksort_threshold: usize,
}

impl Sorter {
    /// Create a sorter using the default quicksort threshold.
    pub const fn new(strategy: SortStrategy) -> Self {
        Self {
            strategy,
            quicksort_threshold: DEFAULT_QUICKSORT_THRESHOLD,
        }
    }

    /// Override the quicksort threshold. Ignored by the other strategies.
    #[must_use]
    pub const fn with_threshold(mut self, quicksort_threshold: usize) -> Self {
        self.quicksort_threshold = quicksort_threshold;
        self
    }

    /// Return the configured strategy.
    pub const fn strategy(&self) -> SortStrategy {
        self.strategy
    }

    /// Return the configured quicksort threshold.
    pub const fn quicksort_threshold(&self) -> usize {
        self.quicksort_threshold
    }

    /// Sort `events` in place by ascending start time.
    pub fn sort(&self, events: &mut [Event]) {
        debug!(
            strategy = %self.strategy,
            len = events.len(),
            threshold = self.quicksort_threshold,
            "sorting events"
        );
        match self.strategy {
            SortStrategy::Insertion => insertion_sort(events),
            SortStrategy::Bubble => bubble_sort(events),
            SortStrategy::Quick => quick_sort(events, self.quicksort_threshold),
        }
    }
}

impl Default for Sorter {
    fn default() -> Self {
        Self::new(SortStrategy::default())
    }
}

/// Sort `events` in place with a stable insertion sort.
pub fn insertion_sort(events: &mut [Event]) {
    if let Some(last) = events.len().checked_sub(1) {
        insertion_sort_range(events, 0, last);
    }
}

/// Sort `events` in place with a stable bubble sort.
///
/// Always performs the full double loop; there is no early exit on an
/// already sorted pass.
pub fn bubble_sort(events: &mut [Event]) {
    let len = events.len();
    for pass in 0..len {
        let unsorted = len.saturating_sub(pass).saturating_sub(1);
        for j in 0..unsorted {
            let next = j.saturating_add(1);
            if starts_after(events, j, next) {
                events.swap(j, next);
            }
        }
    }
}

/// Sort `events` in place with the hybrid quicksort.
///
/// Subranges with fewer than `threshold` elements are finished by insertion
/// sort. A threshold of 0 or 1 still terminates: single-element ranges are
/// never partitioned.
pub fn quick_sort(events: &mut [Event], threshold: usize) {
    if let Some(last) = events.len().checked_sub(1) {
        quick_sort_range(events, 0, last, threshold);
    }
}

/// Whether the event at `a` starts strictly after the event at `b`.
///
/// Out-of-range indices compare as "not after".
fn starts_after(events: &[Event], a: usize, b: usize) -> bool {
    match (events.get(a), events.get(b)) {
        (Some(left), Some(right)) => left.cmp_start(right) == Ordering::Greater,
        _ => false,
    }
}

/// Insertion sort restricted to the inclusive range `[low, high]`.
#[allow(clippy::arithmetic_side_effects)] // j > low >= 0, so j - 1 cannot underflow.
fn insertion_sort_range(events: &mut [Event], low: usize, high: usize) {
    for i in low.saturating_add(1)..=high {
        let mut j = i;
        while j > low && starts_after(events, j - 1, j) {
            events.swap(j - 1, j);
            j -= 1;
        }
    }
}

fn quick_sort_range(events: &mut [Event], low: usize, high: usize, threshold: usize) {
    if low >= high {
        return;
    }
    let size = high.saturating_sub(low).saturating_add(1);
    if size < threshold {
        insertion_sort_range(events, low, high);
        return;
    }

    let Some(pivot) = median_of_three(events, low, high) else {
        return;
    };
    let split = hoare_partition(events, low, high, pivot);

    // low <= split < high, so both halves are strictly smaller.
    quick_sort_range(events, low, split, threshold);
    quick_sort_range(events, split.saturating_add(1), high, threshold);
}

/// Order the first, middle, and last elements of `[low, high]` and return
/// the start time of the median, which ends up in the middle slot.
fn median_of_three(events: &mut [Event], low: usize, high: usize) -> Option<i64> {
    let mid = low.saturating_add(high.saturating_sub(low) / 2);
    if starts_after(events, low, mid) {
        events.swap(low, mid);
    }
    if starts_after(events, low, high) {
        events.swap(low, high);
    }
    if starts_after(events, mid, high) {
        events.swap(mid, high);
    }
    events.get(mid).map(Event::start_time)
}

/// Hoare partition of `[low, high]` around `pivot`.
///
/// Returns `split` such that every element of `[low, split]` starts at or
/// before `pivot` and every element of `[split + 1, high]` starts at or after
/// it. The pivot element itself may land on either side.
#[allow(clippy::arithmetic_side_effects)] // Cursors stay within [low, high]: the pivot value is present in the range.
fn hoare_partition(events: &mut [Event], low: usize, high: usize, pivot: i64) -> usize {
    let mut i = low;
    let mut j = high;
    loop {
        while events.get(i).is_some_and(|e| e.start_time() < pivot) {
            i += 1;
        }
        while events.get(j).is_some_and(|e| e.start_time() > pivot) {
            j -= 1;
        }
        if i >= j {
            return j;
        }
        events.swap(i, j);
        i += 1;
        j -= 1;
    }
}
