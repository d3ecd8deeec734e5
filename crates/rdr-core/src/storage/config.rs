//! Configuration management
//!
//! The server URL is stored in a TOML config file or given by environment variable.
//! Priority: CLI argument > config.toml > RDR_URL environment variable > default.

use super::Result;
use crate::api::client::DEFAULT_BASE_URL;
use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const URL_ENV_VAR: &str = "RDR_URL";

/// Settings persisted in `config.toml`
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Config {
    /// Redash server URL
    pub url: Option<String>,
}

impl Config {
    /// Read the config file; a missing file yields the default configuration.
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let path = resolve_path(path)?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| file_io(&path, e))?;
        toml::from_str(&content).map_err(|e| StorageError::ConfigParseError {
            message: format!("{} is not valid TOML: {}", path.display(), e),
        })
    }

    /// Write the config file, creating its directory when needed.
    pub fn save(&self, path: Option<PathBuf>) -> Result<()> {
        let path = resolve_path(path)?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| file_io(dir, e))?;
        }

        let content = toml::to_string(self).map_err(|e| StorageError::ConfigParseError {
            message: format!("Cannot encode configuration: {}", e),
        })?;
        fs::write(&path, content).map_err(|e| file_io(&path, e))
    }

    /// `~/.config/rdr-cli/config.toml`
    pub fn config_file_path() -> Result<PathBuf> {
        dirs::home_dir()
            .map(|home| home.join(".config").join("rdr-cli").join("config.toml"))
            .ok_or(StorageError::ConfigDirNotFound)
    }

    /// Configured URL, or RDR_URL when the file sets none.
    pub fn get_url(&self) -> Option<String> {
        self.url
            .clone()
            .or_else(|| std::env::var(URL_ENV_VAR).ok().filter(|s| !s.is_empty()))
    }

    /// URL to connect to, falling back to the local default server
    pub fn effective_url(&self) -> String {
        self.get_url().unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    pub fn set_url(&mut self, url: String) {
        self.url = Some(url);
    }
}

fn resolve_path(path: Option<PathBuf>) -> Result<PathBuf> {
    match path {
        Some(path) => Ok(path),
        None => Config::config_file_path(),
    }
}

fn file_io(path: &Path, source: std::io::Error) -> StorageError {
    StorageError::FileIo {
        path: path.display().to_string(),
        source,
    }
}
