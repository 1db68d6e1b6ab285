//! Bulk loading of events from comma-separated text.
//!
//! # Format
//!
//! One record per line:
//!
//! ```text
//! name,start_time,duration,category
//! ```
//!
//! - Each field is trimmed of surrounding whitespace.
//! - Blank lines are ignored.
//! - Lines without exactly four fields are skipped and counted.
//! - A `start_time` or `duration` that is not an integer is handled per
//!   [`InvalidNumberPolicy`]. The default aborts the load, and events
//!   appended before the bad line stay in place.
//!
//! A missing file is reported as [`LoadError::NotFound`], distinct from a
//! malformed record. The destination is left untouched in that case.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::num::ParseIntError;
use std::path::{Path, PathBuf};

use agenda_types::Event;
use serde::Deserialize;
use tracing::{info, warn};

/// Errors that can occur while loading events.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The event file does not exist.
    #[error("event file not found: {}", path.display())]
    NotFound {
        /// The path that was requested.
        path: PathBuf,
    },

    /// The event file exists but could not be opened.
    #[error("failed to open event file {}: {source}", path.display())]
    Open {
        /// The path that was requested.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// Reading a line from the source failed.
    #[error("failed to read line {line}: {source}")]
    Read {
        /// One-based line number.
        line: usize,
        /// The underlying I/O error.
        source: io::Error,
    },

    /// A numeric field did not parse as an integer.
    #[error(
        "line {line}: {field} is not an integer: {value:?} ({loaded} events loaded before the failure)"
    )]
    InvalidNumber {
        /// One-based line number.
        line: usize,
        /// Which field failed (`start_time` or `duration`).
        field: &'static str,
        /// The offending text, already trimmed.
        value: String,
        /// Events appended by this load before the failure.
        loaded: usize,
        /// The underlying parse error.
        source: ParseIntError,
    },
}

/// What to do with a record whose numeric field is not an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidNumberPolicy {
    /// Stop the load and return [`LoadError::InvalidNumber`].
    #[default]
    Abort,
    /// Skip the line, like a record with the wrong field count.
    SkipLine,
}

/// Summary of a completed load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Events appended to the destination.
    pub loaded: usize,
    /// Lines skipped for having the wrong number of fields.
    pub skipped_malformed: usize,
    /// Lines skipped for a non-integer numeric field
    /// ([`InvalidNumberPolicy::SkipLine`] only).
    pub skipped_invalid_number: usize,
}

/// A non-integer numeric field found while parsing a record.
struct BadNumber {
    field: &'static str,
    value: String,
    source: ParseIntError,
}

/// One parsed line.
enum Record {
    Blank,
    WrongFieldCount(usize),
    Event(Event),
}

/// Load events from the file at `path`, appending them to `events`.
///
/// # Errors
///
/// Returns [`LoadError::NotFound`] if the file does not exist (with `events`
/// unchanged), [`LoadError::Open`] or [`LoadError::Read`] on other I/O
/// failures, and [`LoadError::InvalidNumber`] under
/// [`InvalidNumberPolicy::Abort`].
pub fn load_from_path(
    path: &Path,
    policy: InvalidNumberPolicy,
    events: &mut Vec<Event>,
) -> Result<LoadReport, LoadError> {
    let file = File::open(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            LoadError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::Open {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    let report = load_from_reader(BufReader::new(file), policy, events)?;
    info!(
        path = %path.display(),
        loaded = report.loaded,
        skipped_malformed = report.skipped_malformed,
        skipped_invalid_number = report.skipped_invalid_number,
        "Events loaded"
    );
    Ok(report)
}

/// Load events from any buffered reader, appending them to `events`.
///
/// # Errors
///
/// Returns [`LoadError::Read`] if a line cannot be read, and
/// [`LoadError::InvalidNumber`] under [`InvalidNumberPolicy::Abort`].
pub fn load_from_reader<R: BufRead>(
    reader: R,
    policy: InvalidNumberPolicy,
    events: &mut Vec<Event>,
) -> Result<LoadReport, LoadError> {
    let mut report = LoadReport::default();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index.saturating_add(1);
        let line = line.map_err(|source| LoadError::Read {
            line: line_no,
            source,
        })?;

        match parse_record(&line) {
            Ok(Record::Blank) => {}
            Ok(Record::WrongFieldCount(count)) => {
                warn!(line = line_no, fields = count, "skipping record with wrong field count");
                report.skipped_malformed = report.skipped_malformed.saturating_add(1);
            }
            Ok(Record::Event(event)) => {
                events.push(event);
                report.loaded = report.loaded.saturating_add(1);
            }
            Err(bad) => match policy {
                InvalidNumberPolicy::Abort => {
                    return Err(LoadError::InvalidNumber {
                        line: line_no,
                        field: bad.field,
                        value: bad.value,
                        loaded: report.loaded,
                        source: bad.source,
                    });
                }
                InvalidNumberPolicy::SkipLine => {
                    warn!(
                        line = line_no,
                        field = bad.field,
                        value = %bad.value,
                        "skipping record with non-integer field"
                    );
                    report.skipped_invalid_number =
                        report.skipped_invalid_number.saturating_add(1);
                }
            },
        }
    }

    Ok(report)
}

fn parse_record(line: &str) -> Result<Record, BadNumber> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Record::Blank);
    }

    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let [name, start_time, duration, category] = fields.as_slice() else {
        return Ok(Record::WrongFieldCount(fields.len()));
    };

    let start_time = parse_int("start_time", start_time)?;
    let duration = parse_int("duration", duration)?;
    Ok(Record::Event(Event::new(*name, start_time, duration, *category)))
}

fn parse_int(field: &'static str, value: &str) -> Result<i64, BadNumber> {
    value.parse().map_err(|source| BadNumber {
        field,
        value: value.to_owned(),
        source,
    })
}
