//! Configuration file management for Showdown.
//!
//! Supports reading secrets from `~/.config/showdown/secret.json` and
//! optional oracle settings from `~/.config/showdown/config.toml`.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use showdown_core::ShowdownError;
use showdown_core::error::Result;
use showdown_core::session::GameMode;

/// Root configuration structure for secret.json
#[derive(Debug, Clone, Deserialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub openrouter: Option<OpenRouterConfig>,
}

/// OpenRouter API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OpenRouterConfig {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
}

/// Optional non-secret settings from config.toml.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    /// Model override, same meaning as SHOWDOWN_MODEL_NAME.
    #[serde(default)]
    pub model: Option<String>,
    /// Endpoint override for self-hosted gateways.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Bound on the remote call, in seconds.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// Opponent mode the session starts in.
    #[serde(default)]
    pub default_mode: Option<GameMode>,
}

/// Loads the secret configuration file from ~/.config/showdown/secret.json
pub fn load_secret_config() -> Result<SecretConfig> {
    load_secret_config_from(&secret_path()?)
}

/// Loads a secret configuration file from an explicit path.
pub fn load_secret_config_from(path: &Path) -> Result<SecretConfig> {
    if !path.exists() {
        return Err(ShowdownError::config(format!(
            "Configuration file not found at: {}",
            path.display()
        )));
    }

    let content = fs::read_to_string(path).map_err(|e| {
        ShowdownError::config(format!(
            "Failed to read configuration file at {}: {}",
            path.display(),
            e
        ))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        ShowdownError::config(format!(
            "Failed to parse configuration file at {}: {}",
            path.display(),
            e
        ))
    })
}

/// Loads ~/.config/showdown/config.toml, or defaults when the file does
/// not exist. A present-but-unparseable file is an error.
pub fn load_file_config() -> Result<FileConfig> {
    load_file_config_from(&config_path()?)
}

/// Loads a config.toml from an explicit path.
pub fn load_file_config_from(path: &Path) -> Result<FileConfig> {
    if !path.exists() {
        return Ok(FileConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        ShowdownError::config(format!(
            "Failed to read configuration file at {}: {}",
            path.display(),
            e
        ))
    })?;

    toml::from_str(&content).map_err(|e| {
        ShowdownError::config(format!(
            "Failed to parse configuration file at {}: {}",
            path.display(),
            e
        ))
    })
}

/// Returns the path to the secret file: ~/.config/showdown/secret.json
fn secret_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("secret.json"))
}

/// Returns the path to the settings file: ~/.config/showdown/config.toml
fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| ShowdownError::config("Could not determine home directory"))?;
    Ok(home.join(".config").join("showdown"))
}
