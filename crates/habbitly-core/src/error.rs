//! Core error types for habbitly-core.
//!
//! One thiserror hierarchy for the whole library: storage, config,
//! the motivation service client, and input validation.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for habbitly-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Motivation service errors
    #[error("Motivation service error: {0}")]
    Motivation(#[from] MotivationError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV encoding errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Failed to prepare the data directory
    #[error("Failed to prepare data directory: {0}")]
    DataDir(#[from] std::io::Error),

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
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

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Errors from the external motivation text-generation service.
///
/// These are always recoverable: callers fall back to a canned tip
/// instead of propagating a crash.
#[derive(Error, Debug)]
pub enum MotivationError {
    /// No endpoint configured
    #[error("No motivation endpoint configured (set motivation.endpoint)")]
    MissingEndpoint,

    /// Request could not be sent (network, DNS, timeout)
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Service answered with a non-success status
    #[error("Service returned HTTP {status}")]
    Http { status: u16 },

    /// Response body did not match the expected schema
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Required field was empty
    #[error("Required field '{0}' is empty")]
    EmptyField(&'static str),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        field: &'static str,
        message: String,
    },
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
