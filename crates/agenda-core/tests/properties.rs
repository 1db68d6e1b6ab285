//! Property-based invariants for sorting, locating, and querying events.
//!
//! - Every sorting strategy yields a start-time-ordered permutation.
//! - The locator returns the lower bound for any query.
//! - Shuffling never adds, drops, or alters events.
//! - On disjoint events, the two-candidate queries agree with a linear scan.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]

use agenda_core::sort::{self, SortStrategy, Sorter};
use agenda_core::{Event, EventStore, locator, query};
use agenda_types::by_start_time;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Events with a narrow start range so duplicate start times are common.
fn arb_events() -> impl Strategy<Value = Vec<Event>> {
    prop::collection::vec((-50i64..50, 0i64..20, 0u8..8), 0..60).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (start, duration, tag))| {
                Event::new(format!("e{i}"), start, duration, format!("c{tag}"))
            })
            .collect()
    })
}

/// Sorted, pairwise disjoint events (closed spans never touch).
fn arb_disjoint_events() -> impl Strategy<Value = Vec<Event>> {
    prop::collection::vec((1i64..10, 1i64..10), 0..30).prop_map(|raw| {
        let mut cursor = -100;
        raw.into_iter()
            .enumerate()
            .map(|(i, (gap, duration))| {
                let start = cursor + gap;
                cursor = start + duration;
                Event::new(format!("d{i}"), start, duration, "disjoint")
            })
            .collect()
    })
}

/// Canonical multiset form of an event list.
fn multiset(events: &[Event]) -> Vec<(i64, i64, String, String)> {
    let mut items: Vec<_> = events
        .iter()
        .map(|e| {
            (
                e.start_time(),
                e.duration(),
                e.name().to_owned(),
                e.category().to_owned(),
            )
        })
        .collect();
    items.sort();
    items
}

fn is_sorted_by_start(events: &[Event]) -> bool {
    events.windows(2).all(|w| w[0].start_time() <= w[1].start_time())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Invariant: every strategy produces an ordered permutation of its input.
    #[test]
    fn every_strategy_sorts_a_permutation(events in arb_events(), threshold in 0usize..16) {
        for strategy in [SortStrategy::Insertion, SortStrategy::Bubble, SortStrategy::Quick] {
            let mut sorted = events.clone();
            Sorter::new(strategy).with_threshold(threshold).sort(&mut sorted);
            prop_assert!(is_sorted_by_start(&sorted), "strategy {}", strategy);
            prop_assert_eq!(multiset(&sorted), multiset(&events));
        }
    }

    /// Invariant: the stable strategies match the standard library's stable sort.
    #[test]
    fn stable_strategies_match_std_stable_sort(events in arb_events()) {
        let mut expected = events.clone();
        expected.sort_by(by_start_time);

        let mut by_insertion = events.clone();
        sort::insertion_sort(&mut by_insertion);
        prop_assert_eq!(&by_insertion, &expected);

        let mut by_bubble = events;
        sort::bubble_sort(&mut by_bubble);
        prop_assert_eq!(&by_bubble, &expected);
    }

    /// Invariant: the locator returns the first index with start >= query.
    #[test]
    fn locator_returns_lower_bound(mut events in arb_events(), q in -60i64..60) {
        sort::quick_sort(&mut events, 10);
        let i = locator::lower_bound(&events, q);

        prop_assert!(i <= events.len());
        prop_assert!(events[..i].iter().all(|e| e.start_time() < q));
        prop_assert!(events[i..].iter().all(|e| e.start_time() >= q));
        prop_assert_eq!(i, events.partition_point(|e| e.start_time() < q));
    }

    /// Invariant: shuffling preserves length and contents.
    #[test]
    fn shuffle_is_a_permutation(events in arb_events(), seed in any::<u64>()) {
        let mut store: EventStore = events.iter().cloned().collect();
        store.shuffle(&mut SmallRng::seed_from_u64(seed));
        prop_assert_eq!(store.len(), events.len());
        prop_assert_eq!(multiset(store.events()), multiset(&events));
    }

    /// Invariant: a reported occupant really covers the queried time.
    #[test]
    fn happening_result_covers_time(mut events in arb_events(), time in -60i64..80) {
        sort::insertion_sort(&mut events);
        if let Some(event) = query::event_happening(&events, time) {
            prop_assert!(event.covers(time));
        }
    }

    /// Invariant: on disjoint events, occupancy agrees with a linear scan.
    #[test]
    fn happening_matches_linear_scan_on_disjoint_events(
        events in arb_disjoint_events(),
        time in -120i64..300,
    ) {
        let expected = events.iter().find(|e| e.covers(time));
        prop_assert_eq!(query::event_happening(&events, time), expected);
    }

    /// Invariant: on disjoint events, conflict detection agrees with a linear scan.
    #[test]
    fn conflicts_match_linear_scan_on_disjoint_events(
        events in arb_disjoint_events(),
        time in -120i64..300,
        duration in 0i64..30,
    ) {
        let expected = events.iter().any(|e| e.overlaps(time, duration));
        prop_assert_eq!(query::check_for_conflicts(&events, time, duration), expected);
    }

    /// Invariant: a returned free slot fits the range and overlaps no event.
    #[test]
    fn free_slot_is_free_and_in_range(
        mut events in arb_events(),
        slot_start in -60i64..60,
        length in 0i64..80,
        requested in 1i64..15,
    ) {
        sort::bubble_sort(&mut events);
        let slot_end = slot_start + length;
        if let Some(start) = query::find_free_slot(&events, slot_start, slot_end, requested) {
            prop_assert!(start >= slot_start);
            prop_assert!(start + requested <= slot_end);
            prop_assert!(events.iter().all(|e| !e.overlaps(start, requested)));
        }
    }
}
