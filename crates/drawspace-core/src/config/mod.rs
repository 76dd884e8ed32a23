//! Configuration module for Drawspace
//!
//! Handles loading and parsing of `.drawspace.toml` configuration files
//! with support for environment variable expansion in paths.

mod loader;
mod types;

pub use loader::{load_config, load_from_file, sample_config, ConfigError};
pub use types::{AutosaveConfig, DrawspaceConfig, StorageBackendKind, StorageConfig};
