//! Staging folder configuration resolution
//!
//! The staging folder is resolved once at startup and passed explicitly
//! into the components that need it, so tests can inject an isolated
//! directory instead of reading ambient globals.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Bootstrap configuration loaded from the TOML config file
///
/// Holds only settings that cannot change while the service is running.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Staging folder for uploaded statement files (optional)
    #[serde(default)]
    pub staging_folder: Option<PathBuf>,
}

/// Resolve the staging folder following the priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file (`staging_folder` key)
/// 4. System temp directory default (fallback)
pub fn resolve_staging_folder(cli_arg: Option<&Path>, env_var_name: &str) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Ok(config_path) = locate_config_file() {
        match std::fs::read_to_string(&config_path) {
            Ok(toml_content) => match toml::from_str::<TomlConfig>(&toml_content) {
                Ok(config) => {
                    if let Some(folder) = config.staging_folder {
                        return folder;
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        "Ignoring malformed config file {}: {}",
                        config_path.display(),
                        e
                    );
                }
            },
            Err(e) => {
                tracing::warn!(
                    "Cannot read config file {}: {}",
                    config_path.display(),
                    e
                );
            }
        }
    }

    // Priority 4: System temp directory default
    default_staging_folder()
}

/// Default staging folder under the system temp directory
pub fn default_staging_folder() -> PathBuf {
    std::env::temp_dir().join("stex").join("staging")
}

/// Compiled fallback used when the primary staging folder is not writable
pub fn fallback_staging_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("stex").join("staging"))
        .unwrap_or_else(|| PathBuf::from("./stex_staging"))
}

/// Get the platform config file path (~/.config/stex/config.toml or equivalent)
fn locate_config_file() -> Result<PathBuf> {
    if let Some(path) = dirs::config_dir().map(|d| d.join("stex").join("config.toml")) {
        if path.exists() {
            return Ok(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/stex/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
    }

    Err(Error::Config("No config file found".to_string()))
}
