//! Application State
//!
//! Global state shared by the command handlers: settings, the analysis
//! client and the session controller.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use crate::models::settings::{AppConfig, SettingsUpdate};
use crate::services::analysis::{AnalysisClient, Analyzer};
use crate::services::session::SessionController;
use crate::storage::ConfigService;
use crate::utils::error::AppResult;

/// Application state
pub struct AppState {
    /// Settings the running services were built from
    config: AppConfig,
    config_path: PathBuf,
    config_service: Mutex<ConfigService>,
    client: Arc<AnalysisClient>,
    session: SessionController,
}

impl AppState {
    /// Build all services from a loaded configuration
    pub fn initialize(config_service: ConfigService) -> AppResult<Self> {
        let client = Arc::new(AnalysisClient::from_config(config_service.get_config())?);
        let analyzer: Arc<dyn Analyzer> = client.clone();
        Self::assemble(config_service, client, analyzer)
    }

    /// Same as `initialize`, but submissions go to `analyzer` instead of the
    /// Gemini client.
    pub fn with_analyzer(
        config_service: ConfigService,
        analyzer: Arc<dyn Analyzer>,
    ) -> AppResult<Self> {
        let client = Arc::new(AnalysisClient::from_config(config_service.get_config())?);
        Self::assemble(config_service, client, analyzer)
    }

    fn assemble(
        config_service: ConfigService,
        client: Arc<AnalysisClient>,
        analyzer: Arc<dyn Analyzer>,
    ) -> AppResult<Self> {
        let config = config_service.get_config().clone();
        let config_path = config_service.path().to_path_buf();
        let session = SessionController::with_history_limit(analyzer, config.history_limit)?;

        info!(
            model = %config.model,
            history_limit = config.history_limit,
            "application state initialized"
        );
        Ok(Self {
            config,
            config_path,
            config_service: Mutex::new(config_service),
            client,
            session,
        })
    }

    /// Validate and persist a settings change. The running client and
    /// session keep the settings they were built with.
    pub async fn update_config(&self, update: SettingsUpdate) -> AppResult<AppConfig> {
        self.config_service.lock().await.update_config(update)
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn client(&self) -> &AnalysisClient {
        &self.client
    }

    pub fn session(&self) -> &SessionController {
        &self.session
    }
}
