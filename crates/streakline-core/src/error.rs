//! Core error types for streakline-core.
//!
//! Analytics functions never fail; these errors only surface from the
//! storage and configuration layers that sit around the pure engine.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for streakline-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Data store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

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

/// Errors raised by a [`DataStore`](crate::storage::DataStore) implementation.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A collection file exists but could not be read
    #[error("Failed to read collection '{collection}' from {path}: {source}")]
    ReadFailed {
        collection: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A collection file could not be written
    #[error("Failed to write collection '{collection}' to {path}: {source}")]
    WriteFailed {
        collection: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A collection file holds something other than a JSON array of records
    #[error("Malformed collection '{collection}': {source}")]
    Malformed {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Record lookup failed
    #[error("No {kind} with id '{id}'")]
    NotFound { kind: &'static str, id: String },
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

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Data directory could not be determined or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Validation errors for caller-supplied parameters.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Not a `YYYY-MM-DD` key
    #[error("Invalid date key '{0}': expected YYYY-MM-DD")]
    InvalidDateKey(String),

    /// UTC offset outside the representable range
    #[error("Invalid UTC offset: {minutes} minutes")]
    InvalidOffset { minutes: i32 },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
