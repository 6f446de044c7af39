//! Core error types for timely-core.
//!
//! This module defines the error hierarchy using thiserror. Network,
//! configuration, validation and local-store failures each get their own
//! enum and fold into [`CoreError`].

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for timely-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// REST API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Local key-value store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by the REST resource client.
///
/// Authentication failures are reported as a plain `Status` like any other
/// non-success response.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The server answered with a non-success status
    #[error("HTTP {status} from {url}: {body}")]
    Status {
        status: u16,
        url: String,
        body: String,
    },

    /// Connection, timeout or other transport failure
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Response body did not match the expected shape
    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    /// Base URL could not be joined with a resource path
    #[error("Invalid URL '{0}'")]
    InvalidUrl(String),

    /// Login response carried no token
    #[error("Login response did not contain an access token")]
    MissingToken,
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
}

/// Validation errors raised before any network call is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required form field was empty
    #[error("'{0}' is required")]
    MissingField(&'static str),

    /// Invalid time range
    #[error("Invalid time range: end ({end}) must be after start ({start})")]
    InvalidTimeRange {
        start: chrono::NaiveTime,
        end: chrono::NaiveTime,
    },

    /// Date lies in the past where a future date is required
    #[error("'{field}' must not be in the past")]
    DateInPast { field: &'static str },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: &'static str, message: String },
}

/// Local key-value store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to read the backing file
    #[error("Failed to read store at {path}: {message}")]
    ReadFailed { path: PathBuf, message: String },

    /// Failed to write the backing file
    #[error("Failed to write store at {path}: {message}")]
    WriteFailed { path: PathBuf, message: String },

    /// OS keyring failure
    #[error("Keyring error: {0}")]
    Keyring(#[from] keyring::Error),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
