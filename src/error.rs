//! Error types for pretty-callback.
//!
//! Rendering itself never fails on malformed event payloads; the errors here
//! cover the edges of the reporter: the display sink, decoding an event
//! stream, and loading configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pretty-callback operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for pretty-callback.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Display Errors
    // ========================================================================
    /// Writing to the display sink failed.
    #[error("Failed to write to display: {0}")]
    Display(#[from] std::io::Error),

    // ========================================================================
    // Event Errors
    // ========================================================================
    /// An event in a JSON-lines stream could not be decoded.
    #[error("Failed to decode event on line {line}: {message}")]
    EventDecode {
        /// 1-based line number in the stream
        line: usize,
        /// Error message
        message: String,
        /// Source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A status category name was not recognised.
    #[error("Unknown status category: '{0}'")]
    UnknownStatus(String),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Error loading a configuration file.
    #[error("Failed to load config from '{path}': {message}")]
    ConfigLoad {
        /// Path to the configuration file
        path: PathBuf,
        /// Error message
        message: String,
    },
}

impl Error {
    /// Creates a new event decode error from a JSON or text decoding error.
    pub fn event_decode(
        line: usize,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        let source = source.into();
        Self::EventDecode {
            line,
            message: source.to_string(),
            source: Some(source),
        }
    }

    /// Creates a new configuration load error.
    pub fn config_load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ConfigLoad {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns the error code for CLI exit status.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Display(_) => 2,
            Error::EventDecode { .. } | Error::UnknownStatus(_) => 3,
            Error::ConfigLoad { .. } => 4,
        }
    }
}
