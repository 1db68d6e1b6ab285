//! Error types for the `agenda` binary.
//!
//! [`CliError`] wraps every failure mode that should stop the process.
//! Load problems are deliberately absent: a missing or malformed event
//! file is logged and the command runs against whatever was loaded.

/// Top-level error for the `agenda` binary.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: agenda_core::ConfigError,
    },

    /// The tracing subscriber could not be installed.
    #[error("logging error: {message}")]
    Logging {
        /// Description of the logging failure.
        message: String,
    },

    /// JSON output could not be rendered.
    #[error("output error: {source}")]
    Output {
        /// The underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}
