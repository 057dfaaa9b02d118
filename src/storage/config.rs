//! JSON Configuration Management
//!
//! Handles reading and writing the application configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::models::settings::{AppConfig, SettingsUpdate};
use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::{config_path, ensure_dir};

/// Environment variable holding the proxy password, which is never stored
/// in config.json.
pub const PROXY_PASSWORD_ENV: &str = "VERITAS_PROXY_PASSWORD";

/// Configuration service for managing app settings
#[derive(Debug)]
pub struct ConfigService {
    config_path: PathBuf,
    config: AppConfig,
}

impl ConfigService {
    /// Open the config at the default location (~/.veritas/config.json)
    pub fn new() -> AppResult<Self> {
        Self::open(config_path()?)
    }

    /// Open the config at `path`, creating it with defaults if missing
    pub fn open(config_path: PathBuf) -> AppResult<Self> {
        if let Some(parent) = config_path.parent() {
            ensure_dir(parent)?;
        }

        let mut config = if config_path.exists() {
            Self::load_from_file(&config_path)?
        } else {
            let default_config = AppConfig::default();
            Self::save_to_file(&config_path, &default_config)?;
            info!(path = %config_path.display(), "created default configuration");
            default_config
        };
        Self::apply_env(&mut config);

        debug!(
            model = %config.model,
            history_limit = config.history_limit,
            "configuration loaded"
        );
        Ok(Self {
            config_path,
            config,
        })
    }

    /// Fill in secrets that only ever come from the environment.
    fn apply_env(config: &mut AppConfig) {
        if let Some(proxy) = config.proxy.as_mut() {
            if proxy.password.is_none() {
                proxy.password = std::env::var(PROXY_PASSWORD_ENV).ok();
            }
        }
    }

    /// Load configuration from a file
    fn load_from_file(path: &Path) -> AppResult<AppConfig> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        config.validate().map_err(AppError::config)?;
        Ok(config)
    }

    /// Save configuration to a file with pretty formatting
    fn save_to_file(path: &Path, config: &AppConfig) -> AppResult<()> {
        config.validate().map_err(AppError::config)?;
        let content = serde_json::to_string_pretty(config)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the current configuration
    pub fn get_config(&self) -> &AppConfig {
        &self.config
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Update the configuration with a partial update
    pub fn update_config(&mut self, update: SettingsUpdate) -> AppResult<AppConfig> {
        let mut candidate = self.config.clone();
        candidate.apply_update(update)?;
        Self::save_to_file(&self.config_path, &candidate)?;
        Self::apply_env(&mut candidate);
        info!(path = %self.config_path.display(), "configuration saved");
        self.config = candidate;
        Ok(self.config.clone())
    }
}
