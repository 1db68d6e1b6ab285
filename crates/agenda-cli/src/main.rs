//! Command-line front end for the Agenda event store.
//!
//! # Startup Sequence
//!
//! 1. Parse arguments
//! 2. Load configuration from `agenda-config.yaml` (or defaults)
//! 3. Initialize structured logging (tracing), on stderr
//! 4. Load the event file into a store (failures are logged, not fatal)
//! 5. Optionally shuffle, then sort with the configured strategy
//! 6. Run the requested command and print its result on stdout

mod cli;
mod error;

use std::path::Path;

use agenda_core::config::{LogFormat, LoggingConfig};
use agenda_core::{AgendaConfig, EventStore, LoadError};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::{CliArgs, Command};
use crate::error::CliError;

fn main() -> Result<(), CliError> {
    let args = CliArgs::parse();

    let mut config = load_config(&args.config)?;
    if let Some(strategy) = args.sort {
        config.sorting.strategy = strategy;
    }
    if let Some(seed) = args.seed {
        config.shuffle.seed = Some(seed);
    }

    init_logging(&config.logging)?;
    info!(
        strategy = %config.sorting.strategy,
        quicksort_threshold = config.sorting.quicksort_threshold,
        on_invalid_number = ?config.load.on_invalid_number,
        "Configuration loaded"
    );

    let mut store = EventStore::new();
    if let Some(path) = &args.file {
        load_events(&mut store, path, &config);
    }

    if args.shuffle {
        match config.shuffle.seed {
            Some(seed) => store.shuffle(&mut StdRng::seed_from_u64(seed)),
            None => store.shuffle(&mut rand::rng()),
        }
    }

    if args.unsorted {
        warn!("Skipping sort; interval queries assume start-time order");
    } else {
        store.sort(&config.sorting.sorter());
    }

    run(&store, &args.command)
}

/// Load configuration from `path`, falling back to defaults if it is absent.
fn load_config(path: &Path) -> Result<AgendaConfig, CliError> {
    if path.exists() {
        Ok(AgendaConfig::from_file(path)?)
    } else {
        let mut config = AgendaConfig::default();
        config.apply_env_overrides();
        Ok(config)
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_logging(config: &LoggingConfig) -> Result<(), CliError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_err| EnvFilter::try_new(&config.level))
        .map_err(|e| CliError::Logging {
            message: format!("invalid log level {:?}: {e}", config.level),
        })?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    let result = match config.format {
        LogFormat::Plain => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    result.map_err(|e| CliError::Logging {
        message: e.to_string(),
    })
}

/// Load the event file into `store`. Every load failure is non-fatal.
fn load_events(store: &mut EventStore, path: &Path, config: &AgendaConfig) {
    match store.load_from_file(path, config.load.on_invalid_number) {
        Ok(_) => {}
        Err(LoadError::NotFound { path }) => {
            warn!(path = %path.display(), "Event file not found, continuing with an empty store");
        }
        Err(e @ LoadError::InvalidNumber { .. }) => {
            warn!(error = %e, kept = store.len(), "Load aborted on a non-integer field");
        }
        Err(e) => {
            warn!(error = %e, kept = store.len(), "Load failed");
        }
    }
}

/// Execute `command` against the prepared store.
fn run(store: &EventStore, command: &Command) -> Result<(), CliError> {
    match *command {
        Command::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(store.events())?);
            } else {
                for (index, event) in store.iter().enumerate() {
                    println!("{index:>4}  {event}");
                }
            }
        }
        Command::Find { ref name } => match store.find_by_name(name) {
            Some(event) => println!("{event}"),
            None => println!("not found: {name}"),
        },
        Command::Happening { time } => match store.event_happening(time) {
            Some(event) => println!("{event}"),
            None => println!("nothing scheduled at {time}"),
        },
        Command::Conflicts { time, duration } => {
            let verdict = if store.check_for_conflicts(time, duration) {
                "conflict"
            } else {
                "free"
            };
            println!("{verdict}");
        }
        Command::FreeSlot {
            start,
            end,
            duration,
        } => match store.find_free_slot(start, end, duration) {
            Some(slot) => println!("{slot}"),
            None => println!("no free slot of length {duration} in [{start}, {end}]"),
        },
    }
    Ok(())
}
