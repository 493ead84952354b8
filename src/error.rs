//! Unified error types for airscan.
//!
//! Errors are grouped by subsystem with kind sub-enums so callers can match
//! on the broad category while logs keep the specific cause.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for airscan operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AirscanError {
    /// Errors in the local client configuration
    #[error("Configuration error: {context}")]
    Config {
        context: String,
        #[source]
        source: ConfigErrorKind,
    },

    /// Errors in the live-feed layer
    #[error("Feed error: {context}")]
    Feed {
        context: String,
        #[source]
        source: FeedErrorKind,
    },

    /// Errors from the terminal host
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Specific configuration error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConfigErrorKind {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid YAML: {0}")]
    InvalidYaml(String),

    #[error("Invalid field value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Specific feed error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FeedErrorKind {
    #[error("Event stream disconnected")]
    Disconnected,

    #[error("Invalid event payload: {0}")]
    InvalidEvent(String),

    #[error("Source failed: {0}")]
    SourceFailed(String),
}

/// Convenient Result type for airscan operations
pub type Result<T> = std::result::Result<T, AirscanError>;

impl AirscanError {
    /// Create a configuration error with context
    pub fn config(context: impl Into<String>, source: ConfigErrorKind) -> Self {
        Self::Config {
            context: context.into(),
            source,
        }
    }

    /// Create a feed error with context
    pub fn feed(context: impl Into<String>, source: FeedErrorKind) -> Self {
        Self::Feed {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }
}

impl From<std::io::Error> for AirscanError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_yaml::Error> for AirscanError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::config(
            "YAML deserialization",
            ConfigErrorKind::InvalidYaml(err.to_string()),
        )
    }
}
