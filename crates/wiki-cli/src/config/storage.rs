//! Configuration storage for persisting connection defaults.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Stored configuration. Passwords are never written here.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StoredConfig {
    pub api_url: Option<String>,
    pub user: Option<String>,
    pub user_agent: Option<String>,
}

/// Get the config file path.
pub fn config_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "wiki").context("Could not determine config directory")?;

    let config_dir = dirs.config_dir();
    fs::create_dir_all(config_dir).context("Failed to create config directory")?;

    Ok(config_dir.join("config.json"))
}

/// Save the configuration to disk.
pub fn save_config(config: &StoredConfig) -> Result<PathBuf> {
    let path = config_path()?;
    let json = serde_json::to_string_pretty(config)?;

    fs::write(&path, &json).context("Failed to write config file")?;

    // Set restrictive permissions (Unix only)
    #[cfg(unix)]
    {
        let mut perms = fs::metadata(&path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(&path, perms)?;
    }

    Ok(path)
}

/// Load the configuration, or defaults if none was saved.
pub fn load_config() -> Result<StoredConfig> {
    let path = config_path()?;

    if !path.exists() {
        return Ok(StoredConfig::default());
    }

    let json = fs::read_to_string(&path).context("Failed to read config file")?;
    serde_json::from_str(&json).context("Invalid config file")
}
