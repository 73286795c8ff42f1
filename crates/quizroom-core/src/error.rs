//! Core error types for quizroom-core.
//!
//! Only loading the question set is fatal to a session. Storage read
//! failures are recovered by starting fresh, and invalid user actions are
//! no-ops rather than errors.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for quizroom-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Question set could not be loaded
    #[error("Failed to load questions: {0}")]
    Load(#[from] LoadError),

    /// Progress storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Failure to fetch or parse the question set.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Reading a local question file failed
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP request itself failed
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// No async runtime could be started for the request
    #[error("cannot start HTTP runtime: {0}")]
    Runtime(#[source] std::io::Error),

    /// The server answered with a non-success status
    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    /// Payload is not valid JSON
    #[error("payload is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Payload parsed but is not a JSON array
    #[error("payload is not a list of questions")]
    NotAList,

    /// Payload is an empty array
    #[error("No questions found.")]
    Empty,

    /// A question record fails the shape checks
    #[error("question {index} is invalid: {message}")]
    InvalidQuestion { index: usize, message: String },
}

/// Progress storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// SQLite failure
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Serializing the session record failed
    #[error("cannot encode session state: {0}")]
    Json(#[from] serde_json::Error),

    /// The data directory is unavailable
    #[error("data directory unavailable: {0}")]
    DataDir(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not exist in the configuration tree
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
