//! Error types for Drawspace Core
//!
//! Provides a unified error type for all persistence and session operations.

use crate::config::ConfigError;
use thiserror::Error;

/// Result type for Drawspace Core operations
pub type Result<T> = std::result::Result<T, DrawspaceError>;

/// Unified error type for Drawspace Core
#[derive(Error, Debug)]
pub enum DrawspaceError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization error (including undecodable stored records)
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Storage backend fault (quota, corruption, simulated failure)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Workspace name rejected
    #[error("Invalid workspace name: {0:?}")]
    InvalidName(String),

    /// Channel error (communication failure)
    #[error("Channel error: {0}")]
    Channel(String),
}

impl DrawspaceError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        DrawspaceError::Config(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        DrawspaceError::Storage(msg.into())
    }

    /// Create an invalid name error
    pub fn invalid_name(name: impl Into<String>) -> Self {
        DrawspaceError::InvalidName(name.into())
    }
}

impl From<serde_json::Error> for DrawspaceError {
    fn from(err: serde_json::Error) -> Self {
        DrawspaceError::Serialization(err.to_string())
    }
}

impl From<ConfigError> for DrawspaceError {
    fn from(err: ConfigError) -> Self {
        DrawspaceError::Config(err.to_string())
    }
}

impl<T> From<crossbeam_channel::TrySendError<T>> for DrawspaceError {
    fn from(err: crossbeam_channel::TrySendError<T>) -> Self {
        DrawspaceError::Channel(format!("Send error: {}", err))
    }
}
