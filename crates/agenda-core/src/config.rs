//! Configuration loading and typed config structures for the Agenda store.
//!
//! The configuration lives in `agenda-config.yaml`. This module defines
//! strongly-typed structs that mirror the YAML structure, and provides a
//! loader that reads and parses the file. Every field has a default, so an
//! empty document (or no file at all) yields a working configuration.
//!
//! ```yaml
//! sorting:
//!   strategy: quick          # insertion | bubble | quick
//!   quicksort_threshold: 10
//! load:
//!   on_invalid_number: abort # abort | skip_line
//! shuffle:
//!   seed: 42                 # omit for a fresh random order each run
//! logging:
//!   level: info
//!   format: plain            # plain | json
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::loader::InvalidNumberPolicy;
use crate::sort::{DEFAULT_QUICKSORT_THRESHOLD, SortStrategy, Sorter};

/// Environment variable overriding `sorting.strategy`.
pub const ENV_SORT_STRATEGY: &str = "AGENDA_SORT_STRATEGY";
/// Environment variable overriding `shuffle.seed`.
pub const ENV_SHUFFLE_SEED: &str = "AGENDA_SHUFFLE_SEED";
/// Environment variable overriding `logging.level`.
pub const ENV_LOG_LEVEL: &str = "AGENDA_LOG_LEVEL";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AgendaConfig {
    /// Sorting strategy settings.
    #[serde(default)]
    pub sorting: SortingConfig,

    /// Bulk-load settings.
    #[serde(default)]
    pub load: LoadConfig,

    /// Shuffle settings.
    #[serde(default)]
    pub shuffle: ShuffleConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AgendaConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `AGENDA_SORT_STRATEGY` overrides `sorting.strategy`
    /// - `AGENDA_SHUFFLE_SEED` overrides `shuffle.seed`
    /// - `AGENDA_LOG_LEVEL` overrides `logging.level`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string. No environment overrides
    /// are applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as null; treat it as all defaults.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply environment variable overrides.
    ///
    /// Unparseable override values are logged and ignored.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary lookup (the environment in
    /// production, a map in tests).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup(ENV_SORT_STRATEGY) {
            match value.parse::<SortStrategy>() {
                Ok(strategy) => self.sorting.strategy = strategy,
                Err(e) => warn!(error = %e, "ignoring {ENV_SORT_STRATEGY} override"),
            }
        }
        if let Some(value) = lookup(ENV_SHUFFLE_SEED) {
            match value.trim().parse::<u64>() {
                Ok(seed) => self.shuffle.seed = Some(seed),
                Err(e) => warn!(error = %e, value = %value, "ignoring {ENV_SHUFFLE_SEED} override"),
            }
        }
        if let Some(value) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = value;
        }
    }
}

/// Sorting configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SortingConfig {
    /// Strategy applied before interval queries.
    #[serde(default)]
    pub strategy: SortStrategy,

    /// Subrange size below which the quicksort switches to insertion sort.
    #[serde(default = "default_quicksort_threshold")]
    pub quicksort_threshold: usize,
}

impl SortingConfig {
    /// Build a [`Sorter`] from this configuration.
    pub const fn sorter(&self) -> Sorter {
        Sorter::new(self.strategy).with_threshold(self.quicksort_threshold)
    }
}

impl Default for SortingConfig {
    fn default() -> Self {
        Self {
            strategy: SortStrategy::default(),
            quicksort_threshold: default_quicksort_threshold(),
        }
    }
}

/// Bulk-load configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoadConfig {
    /// How to treat a record with a non-integer numeric field.
    #[serde(default)]
    pub on_invalid_number: InvalidNumberPolicy,
}

/// Shuffle configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ShuffleConfig {
    /// Seed for reproducible shuffles. `None` draws from the thread RNG.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default log level filter, used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Plain,
    /// One JSON object per line.
    Json,
}

const fn default_quicksort_threshold() -> usize {
    DEFAULT_QUICKSORT_THRESHOLD
}

fn default_log_level() -> String {
    "info".to_owned()
}
