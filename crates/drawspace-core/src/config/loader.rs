//! Configuration loader with environment variable expansion
//!
//! Loads configuration from `.drawspace.toml` in the project root or the user
//! config directory.

use super::types::DrawspaceConfig;
use regex::Regex;
use std::path::{Path, PathBuf};

/// Configuration loading error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Load configuration from various sources
///
/// Priority order:
/// 1. Project-level `.drawspace.toml`
/// 2. User-level `~/.config/drawspace/config.toml`
/// 3. Default configuration
pub fn load_config(project_dir: &Path) -> Result<DrawspaceConfig, ConfigError> {
    let project_config = project_dir.join(".drawspace.toml");
    if project_config.exists() {
        return load_from_file(&project_config);
    }

    if let Some(user_config) = get_user_config_path() {
        if user_config.exists() {
            return load_from_file(&user_config);
        }
    }

    Ok(DrawspaceConfig::default())
}

/// Get user config file path
fn get_user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("drawspace").join("config.toml"))
}

/// Load configuration from a specific file
pub fn load_from_file(path: &Path) -> Result<DrawspaceConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut config: DrawspaceConfig = toml::from_str(&content)?;

    if let Some(ref data_dir) = config.storage.data_dir {
        config.storage.data_dir = Some(expand_path(data_dir));
    }

    Ok(config)
}

/// Expand `${VAR}` patterns and a leading `~` in a path
fn expand_path(path: &Path) -> PathBuf {
    let env_regex = Regex::new(r"\$\{([^}]+)\}").expect("static regex");
    let raw = path.to_string_lossy();
    let expanded = expand_string(&raw, &env_regex);

    match expanded.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(&expanded)),
        None => PathBuf::from(expanded),
    }
}

/// Expand environment variables in a single string
fn expand_string(s: &str, regex: &Regex) -> String {
    regex
        .replace_all(s, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
}

/// Create a sample configuration file content
pub fn sample_config() -> &'static str {
    r#"# Drawspace Configuration
# Place this file in your project root as .drawspace.toml
# or in ~/.config/drawspace/config.toml for global settings

[storage]
# filesystem or memory
backend = "filesystem"

# Where workspace records live (defaults to the platform data dir)
# data_dir = "~/Drawings/.drawspace"

[autosave]
enabled = true

# Seconds between autosave ticks
interval_secs = 30
"#
}
