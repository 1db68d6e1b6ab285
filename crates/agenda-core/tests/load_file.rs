//! File-based bulk load tests.
//!
//! Writes event files into temporary directories and loads them through
//! [`EventStore::load_from_file`], covering round trips, missing files,
//! and both invalid-number policies.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic,
    clippy::arithmetic_side_effects
)]

use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use agenda_core::{Event, EventStore, InvalidNumberPolicy, LoadError};
use tempfile::TempDir;

/// Write `contents` to `events.txt` inside a fresh temp directory.
fn write_events(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("events.txt");
    fs::write(&path, contents).expect("write events file");
    (dir, path)
}

#[test]
fn round_trip_preserves_fields_and_order() {
    let written: Vec<Event> = (0..25)
        .map(|i| {
            Event::new(
                format!("Event {i}"),
                1000 - i * 37,
                i % 7,
                if i % 2 == 0 { "even" } else { "odd" },
            )
        })
        .collect();

    let mut contents = String::new();
    for event in &written {
        writeln!(
            contents,
            "{},{},{},{}",
            event.name(),
            event.start_time(),
            event.duration(),
            event.category()
        )
        .unwrap();
    }
    let (_dir, path) = write_events(&contents);

    let mut store = EventStore::new();
    let report = store
        .load_from_file(&path, InvalidNumberPolicy::Abort)
        .unwrap();

    assert_eq!(report.loaded, written.len());
    assert_eq!(report.skipped_malformed, 0);
    assert_eq!(store.events(), written.as_slice());
}

#[test]
fn missing_file_is_reported_and_store_is_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does-not-exist.txt");

    let mut store = EventStore::new();
    store.create("kept", 1, 1, "x", None);
    let before = store.clone();

    let result = store.load_from_file(&path, InvalidNumberPolicy::Abort);
    match result {
        Err(LoadError::NotFound { path: reported }) => assert_eq!(reported, path),
        other => panic!("expected NotFound, got {other:?}"),
    }
    assert_eq!(store, before);
}

#[test]
fn malformed_lines_are_skipped_across_a_file() {
    let (_dir, path) = write_events(
        "Standup,0,15,work\n\
         broken line without commas\n\
         \n\
         Lunch,120,60\n\
         Review,300,30,work\n",
    );

    let mut store = EventStore::new();
    let report = store
        .load_from_file(&path, InvalidNumberPolicy::Abort)
        .unwrap();

    assert_eq!(report.loaded, 2);
    assert_eq!(report.skipped_malformed, 2);
    assert_eq!(store.events()[0].name(), "Standup");
    assert_eq!(store.events()[1].name(), "Review");
}

#[test]
fn invalid_number_aborts_with_line_context() {
    let (_dir, path) = write_events("a,1,1,x\nb,2,1,x\nc,three,1,x\nd,4,1,x\n");

    let mut store = EventStore::new();
    let err = store
        .load_from_file(&path, InvalidNumberPolicy::Abort)
        .unwrap_err();

    let message = err.to_string();
    assert!(message.contains("line 3"), "message: {message}");
    assert!(message.contains("start_time"), "message: {message}");
    assert_eq!(store.len(), 2);
}

#[test]
fn skip_line_policy_loads_the_rest_of_the_file() {
    let (_dir, path) = write_events("a,1,1,x\nb,2,1,x\nc,three,1,x\nd,4,1,x\n");

    let mut store = EventStore::new();
    let report = store
        .load_from_file(&path, InvalidNumberPolicy::SkipLine)
        .unwrap();

    assert_eq!(report.loaded, 3);
    assert_eq!(report.skipped_invalid_number, 1);
    assert_eq!(store.find_by_name("d").map(Event::start_time), Some(4));
}

#[test]
fn loaded_store_answers_queries_after_sorting() {
    let (_dir, path) = write_events(
        "Later,10,5,work\n\
         Early,0,5,work\n",
    );

    let mut store = EventStore::new();
    store
        .load_from_file(&path, InvalidNumberPolicy::Abort)
        .unwrap();
    store.insertion_sort();

    assert!(store.check_for_conflicts(12, 3));
    assert!(!store.check_for_conflicts(15, 3));
    assert_eq!(store.find_free_slot(0, 20, 4), Some(5));
    assert_eq!(store.find_free_slot(0, 20, 6), None);
}
