//! Settings Models
//!
//! Application configuration and settings data structures.

use serde::{Deserialize, Serialize};
use veritas_core::proxy::ProxyConfig;
use veritas_core::DEFAULT_HISTORY_LIMIT;
use veritas_llm::{ProviderConfig, DEFAULT_MODEL};

use crate::utils::error::{AppError, AppResult};

/// Environment variable consulted for the API key by default.
pub const DEFAULT_API_KEY_ENV: &str = "API_KEY";

/// Largest history cap accepted from config.json.
pub const MAX_HISTORY_LIMIT: usize = 50;

/// Application configuration stored in config.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Model identifier sent to the inference service
    #[serde(default = "default_model")]
    pub model: String,
    /// Override of the API root (e.g. a local gateway)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Name of the environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Number of past verdicts kept for the session
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    /// Sampling temperature; service default when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Outbound proxy; direct connection when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<ProxyConfig>,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: None,
            api_key_env: default_api_key_env(),
            history_limit: default_history_limit(),
            temperature: None,
            proxy: None,
        }
    }
}

/// Keys accepted by `SettingsUpdate::from_key_value`.
pub const SETTING_KEYS: &[&str] = &[
    "model",
    "base_url",
    "api_key_env",
    "history_limit",
    "temperature",
    "proxy",
];

/// Settings update request (partial update)
///
/// For `base_url` and `proxy` an empty string clears the setting.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SettingsUpdate {
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub api_key_env: Option<String>,
    pub history_limit: Option<usize>,
    pub temperature: Option<f32>,
    /// Proxy URL, `scheme://[user[:pass]@]host:port`
    pub proxy: Option<String>,
}

impl SettingsUpdate {
    /// Build a single-field update from a `key value` pair typed at the
    /// prompt. `none` clears the optional settings.
    pub fn from_key_value(key: &str, value: &str) -> AppResult<Self> {
        let value = value.trim();
        let cleared = |v: &str| {
            if v.eq_ignore_ascii_case("none") {
                String::new()
            } else {
                v.to_string()
            }
        };
        let mut update = Self::default();
        match key.to_ascii_lowercase().as_str() {
            "model" => update.model = Some(value.to_string()),
            "base_url" => update.base_url = Some(cleared(value)),
            "api_key_env" => update.api_key_env = Some(value.to_string()),
            "history_limit" => {
                let limit = value.parse::<usize>().map_err(|_| {
                    AppError::validation(format!(
                        "history_limit must be a whole number: '{}'",
                        value
                    ))
                })?;
                update.history_limit = Some(limit);
            }
            "temperature" => {
                let temperature = value.parse::<f32>().map_err(|_| {
                    AppError::validation(format!("temperature must be a number: '{}'", value))
                })?;
                update.temperature = Some(temperature);
            }
            "proxy" => update.proxy = Some(cleared(value)),
            other => {
                return Err(AppError::validation(format!(
                    "Unknown setting '{}'. Known settings: {}",
                    other,
                    SETTING_KEYS.join(", ")
                )))
            }
        }
        Ok(update)
    }
}

impl AppConfig {
    /// Apply a partial update to the configuration
    pub fn apply_update(&mut self, update: SettingsUpdate) -> AppResult<()> {
        if let Some(model) = update.model {
            self.model = model;
        }
        if let Some(base_url) = update.base_url {
            self.base_url = if base_url.trim().is_empty() {
                None
            } else {
                Some(base_url)
            };
        }
        if let Some(var) = update.api_key_env {
            self.api_key_env = var;
        }
        if let Some(limit) = update.history_limit {
            self.history_limit = limit;
        }
        if let Some(temperature) = update.temperature {
            self.temperature = Some(temperature);
        }
        if let Some(proxy) = update.proxy {
            self.proxy = if proxy.trim().is_empty() {
                None
            } else {
                Some(ProxyConfig::parse(&proxy)?)
            };
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        if self.api_key_env.trim().is_empty() {
            return Err("api_key_env must not be empty".to_string());
        }
        if !(1..=MAX_HISTORY_LIMIT).contains(&self.history_limit) {
            return Err(format!(
                "history_limit must be between 1 and {}",
                MAX_HISTORY_LIMIT
            ));
        }
        if let Some(t) = self.temperature {
            if !(0.0..=2.0).contains(&t) {
                return Err("temperature must be between 0.0 and 2.0".to_string());
            }
        }
        if let Some(base_url) = &self.base_url {
            if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
                return Err(format!("base_url must be an http(s) URL: '{}'", base_url));
            }
        }
        Ok(())
    }

    /// Provider configuration derived from these settings. The API key stays
    /// unset here and is resolved per request.
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            api_key: None,
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            temperature: self.temperature,
            proxy: self.proxy.clone(),
        }
    }
}
