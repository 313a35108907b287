//! Loading of the `~/.gitaudit` JSON configuration file.

use std::env;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;

/// File name of the config file inside the user's home directory.
const CONFIG_FILE_NAME: &str = ".gitaudit";

/// Environment variable to override the config file location.
const CONFIG_ENV_VAR: &str = "GITAUDIT_CONFIG";

/// Settings for the text-generation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Full URL of the generate endpoint, e.g. `http://localhost:11434/api/generate`.
    #[serde(default)]
    pub ollama_endpoint: String,
    #[serde(default)]
    pub ollama_model: String,
}

/// Resolve the config file location.
///
/// Uses `GITAUDIT_CONFIG` when set to a non-empty value, otherwise `~/.gitaudit`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    match env::var(CONFIG_ENV_VAR) {
        Ok(v) if !v.is_empty() => Ok(PathBuf::from(v)),
        _ => dirs::home_dir()
            .map(|home| home.join(CONFIG_FILE_NAME))
            .ok_or(ConfigError::HomeDirUnavailable),
    }
}

/// Load the config from its default location.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = default_config_path()?;
    load_config_from(&path)
}

/// Load and validate the config from an explicit path.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!("Reading config from {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ConfigError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let config: Config =
        serde_json::from_str(&content).map_err(|e| ConfigError::InvalidJson {
            path: path.to_path_buf(),
            source: e,
        })?;

    if config.ollama_endpoint.trim().is_empty() {
        return Err(ConfigError::MissingField {
            path: path.to_path_buf(),
            field: "ollama_endpoint",
        });
    }
    if config.ollama_model.trim().is_empty() {
        return Err(ConfigError::MissingField {
            path: path.to_path_buf(),
            field: "ollama_model",
        });
    }

    Ok(config)
}
