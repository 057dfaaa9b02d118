//! Health Check Commands
//!
//! Commands for checking that the inference service is usable.

use tracing::warn;

use crate::models::response::{CommandResponse, HealthResponse};
use crate::state::AppState;

/// Check the API key and the configured model against the service
pub async fn get_health(state: &AppState) -> CommandResponse<HealthResponse> {
    let client = state.client();
    let mut health = HealthResponse {
        model: client.model().to_string(),
        api_key_configured: client.has_api_key(),
        ..Default::default()
    };

    if !health.api_key_configured {
        health.status = "unconfigured".to_string();
        health.detail = Some(format!(
            "No API key found in {}",
            state.config().api_key_env
        ));
        return CommandResponse::ok(health);
    }

    match client.check_connection().await {
        Ok(()) => {
            health.service_reachable = true;
            health.status = "healthy".to_string();
        }
        Err(e) => {
            warn!(error = %e, "health check failed");
            health.status = "degraded".to_string();
            health.detail = Some(e.to_string());
        }
    }

    CommandResponse::ok(health)
}
