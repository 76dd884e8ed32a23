//! Configuration types for Drawspace
//!
//! Defines the structure of `.drawspace.toml` configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawspaceConfig {
    /// Where workspaces are persisted
    #[serde(default)]
    pub storage: StorageConfig,

    /// Autosave timer settings
    #[serde(default)]
    pub autosave: AutosaveConfig,
}

/// Which storage backend to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackendKind {
    /// One JSON file per record under `data_dir`
    #[default]
    Filesystem,

    /// Volatile, nothing survives the process
    Memory,
}

/// Storage configuration section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackendKind,

    /// Data directory (supports ${ENV_VAR} and leading `~`).
    /// Defaults to the platform data dir, e.g. `~/.local/share/drawspace`.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolve the data directory, falling back to the platform default
    pub fn effective_data_dir(&self) -> Option<PathBuf> {
        self.data_dir.clone().or_else(default_data_dir)
    }
}

fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("drawspace"))
}

/// Autosave configuration section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutosaveConfig {
    /// Whether selecting a workspace arms the autosave timer
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Seconds between autosave ticks
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

fn default_enabled() -> bool {
    true
}

fn default_interval_secs() -> u64 {
    30
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            interval_secs: default_interval_secs(),
        }
    }
}

impl AutosaveConfig {
    /// Tick interval, never shorter than one second
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(1))
    }
}
