//! Error types for TextFlow
//!
//! This module defines all error types used throughout the client,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for TextFlow operations
///
/// Every variant is shown to the user as a blocking message: the CLI exits
/// non-zero and the interactive dashboard prints it and keeps running.
#[derive(Error, Debug)]
pub enum TextflowError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email or password missing before a login attempt
    #[error("{0}")]
    MissingCredentials(String),

    /// The backend refused the login or signup request
    #[error("{0}")]
    LoginRejected(String),

    /// The backend could not be reached at all
    #[error("Could not connect to the backend server at {url}: {message}")]
    Connection {
        /// Base URL that was tried
        url: String,
        /// Underlying transport failure
        message: String,
    },

    /// The backend answered but the response was unusable
    #[error("Backend Error: {0}")]
    Backend(String),

    /// Run or export requested without files, operations, or results
    #[error("{0}")]
    NothingToRun(String),

    /// Operation name not in the catalog
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// File loading errors (read errors, missing files)
    #[error("File load error: {0}")]
    FileLoad(String),

    /// Session persistence errors
    #[error("Session error: {0}")]
    Session(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for TextFlow operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
