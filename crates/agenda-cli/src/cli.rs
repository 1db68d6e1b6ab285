//! Command-line arguments.

use std::path::PathBuf;

use agenda_core::SortStrategy;
use clap::{Parser, Subcommand};

/// Load a flat file of events, sort it, and run an interval query.
#[derive(Debug, Parser)]
#[command(name = "agenda", version, about)]
pub struct CliArgs {
    /// Event file with one `name,start_time,duration,category` record per line.
    #[arg(long, short, env = "AGENDA_EVENTS", value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// YAML configuration file. Defaults are used if it does not exist.
    #[arg(
        long,
        env = "AGENDA_CONFIG",
        value_name = "FILE",
        default_value = "agenda-config.yaml"
    )]
    pub config: PathBuf,

    /// Sorting strategy (insertion, bubble, quick). Overrides the config.
    #[arg(long, value_name = "STRATEGY")]
    pub sort: Option<SortStrategy>,

    /// Keep load order instead of sorting. Interval queries assume sorted
    /// input, so their answers are unreliable with this flag.
    #[arg(long)]
    pub unsorted: bool,

    /// Shuffle the events after loading, before sorting.
    #[arg(long)]
    pub shuffle: bool,

    /// Seed for the shuffle. Overrides the config.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// What to do with the loaded events.
    #[command(subcommand)]
    pub command: Command,
}

/// Operations on the loaded store.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print every event in store order.
    List {
        /// Print a JSON array instead of one line per event.
        #[arg(long)]
        json: bool,
    },

    /// Print the first event with exactly this name.
    Find {
        /// Case-sensitive event name.
        name: String,
    },

    /// Print the event occurring at a point in time.
    #[command(allow_negative_numbers = true)]
    Happening {
        /// Point on the timeline.
        time: i64,
    },

    /// Report whether a proposed span overlaps an existing event.
    #[command(allow_negative_numbers = true)]
    Conflicts {
        /// Proposed start.
        time: i64,
        /// Proposed duration.
        duration: i64,
    },

    /// Find the earliest free slot of a given length inside a range.
    #[command(allow_negative_numbers = true)]
    FreeSlot {
        /// Range start.
        start: i64,
        /// Range end.
        end: i64,
        /// Requested slot length.
        duration: i64,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn definition_is_consistent() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn parses_free_slot_with_negative_numbers() {
        let args =
            CliArgs::try_parse_from(["agenda", "-f", "events.txt", "free-slot", "-10", "20", "4"])
                .unwrap();
        assert_eq!(args.file, Some(PathBuf::from("events.txt")));
        match args.command {
            Command::FreeSlot { start, end, duration } => {
                assert_eq!((start, end, duration), (-10, 20, 4));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_strategy_and_shuffle_flags() {
        let args = CliArgs::try_parse_from([
            "agenda", "--sort", "bubble", "--shuffle", "--seed", "9", "list", "--json",
        ])
        .unwrap();
        assert_eq!(args.sort, Some(SortStrategy::Bubble));
        assert!(args.shuffle);
        assert_eq!(args.seed, Some(9));
        assert!(matches!(args.command, Command::List { json: true }));
    }

    #[test]
    fn rejects_unknown_strategy() {
        let result = CliArgs::try_parse_from(["agenda", "--sort", "merge", "list"]);
        assert!(result.is_err());
    }
}
