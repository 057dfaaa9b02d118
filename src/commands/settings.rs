//! Settings Commands
//!
//! View the active configuration and persist changes to config.json.

use serde::Serialize;

use crate::models::response::CommandResponse;
use crate::models::settings::{AppConfig, SettingsUpdate};
use crate::state::AppState;

/// Active settings plus where they were loaded from
#[derive(Debug, Clone, Serialize)]
pub struct SettingsView {
    pub config_path: String,
    #[serde(flatten)]
    pub config: AppConfig,
}

/// Get current application settings
pub fn get_settings(state: &AppState) -> CommandResponse<SettingsView> {
    CommandResponse::ok(SettingsView {
        config_path: state.config_path().display().to_string(),
        config: state.config().clone(),
    })
}

/// Save one setting, given as it was typed at the prompt.
///
/// The new value takes effect on the next start.
pub async fn update_settings(
    state: &AppState,
    key: &str,
    value: &str,
) -> CommandResponse<AppConfig> {
    match SettingsUpdate::from_key_value(key, value) {
        Ok(update) => state.update_config(update).await.into(),
        Err(e) => CommandResponse::err(e.to_string()),
    }
}
