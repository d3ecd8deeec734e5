//! Configuration service for managing application configuration

use crate::AppError;
use crate::storage::config::Config;
use crate::utils::validation::validate_url;
use std::path::PathBuf;

/// Configuration service for managing application configuration
pub struct ConfigService {
    config: Config,
}

impl ConfigService {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Get configured URL
    pub fn get_url(&self) -> Option<String> {
        self.config.get_url()
    }

    /// Validate and set the URL
    pub fn set_url(&mut self, url: String) -> Result<(), AppError> {
        validate_url(&url)?;
        self.config.set_url(url);
        Ok(())
    }

    /// Save configuration to file
    pub fn save_config(&self, path: Option<PathBuf>) -> Result<(), AppError> {
        self.config.save(path).map_err(|e| e.into())
    }

    pub fn has_url(&self) -> bool {
        self.get_url().is_some()
    }
}
