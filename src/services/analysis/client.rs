//! Analysis Client
//!
//! Sends one text to the inference provider with the fixed instruction and
//! schema, then validates the answer into an `AnalysisResult`.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};
use veritas_core::AnalysisResult;
use veritas_llm::{GeminiProvider, LlmProvider, LlmRequestOptions, StructuredRequest};

use super::credentials::CredentialSource;
use super::error::{AnalysisError, ClientResult};
use super::prompt::{response_schema, SYSTEM_INSTRUCTION};
use super::Analyzer;
use crate::models::settings::AppConfig;
use crate::utils::error::{AppError, AppResult};

/// Client for the remote inference collaborator.
pub struct AnalysisClient {
    provider: Arc<dyn LlmProvider>,
    credentials: CredentialSource,
}

impl AnalysisClient {
    pub fn new(provider: Arc<dyn LlmProvider>, credentials: CredentialSource) -> Self {
        Self {
            provider,
            credentials,
        }
    }

    /// Build a Gemini-backed client from application settings.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let provider = GeminiProvider::new(config.provider_config())?;
        Ok(Self::new(
            Arc::new(provider),
            CredentialSource::env(config.api_key_env.clone()),
        ))
    }

    /// The single request sent for `text`.
    pub fn build_request(text: &str) -> StructuredRequest {
        StructuredRequest {
            content: text.to_string(),
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            response_schema: response_schema(),
        }
    }

    pub fn model(&self) -> &str {
        self.provider.model()
    }

    /// Whether a key is available right now.
    pub fn has_api_key(&self) -> bool {
        self.credentials.resolve().is_some()
    }

    fn resolve_key(&self) -> ClientResult<String> {
        self.credentials
            .resolve()
            .ok_or_else(|| AnalysisError::Configuration(self.credentials.describe()))
    }

    /// Verify that the key is present and accepted by the service.
    pub async fn check_connection(&self) -> AppResult<()> {
        let api_key = self
            .resolve_key()
            .map_err(|e| AppError::config(e.to_string()))?;
        self.provider
            .health_check(LlmRequestOptions {
                api_key_override: Some(api_key),
                ..Default::default()
            })
            .await?;
        Ok(())
    }
}

#[async_trait]
impl Analyzer for AnalysisClient {
    async fn analyze(&self, text: &str) -> ClientResult<AnalysisResult> {
        // Checked before anything touches the network.
        let api_key = self.resolve_key()?;

        let request = Self::build_request(text);
        info!(
            provider = self.provider.name(),
            model = self.provider.model(),
            input_chars = text.chars().count(),
            "requesting analysis"
        );

        let response = self
            .provider
            .generate(
                &request,
                LlmRequestOptions {
                    api_key_override: Some(api_key),
                    ..Default::default()
                },
            )
            .await?;

        let body = response.text().ok_or(AnalysisError::EmptyResponse)?;

        let result = AnalysisResult::from_json(body).map_err(|e| {
            warn!(error = %e, "rejecting malformed analysis payload");
            AnalysisError::Format(e.to_string())
        })?;

        if !result.has_expected_indicator_count() {
            warn!(
                count = result.key_indicators.len(),
                "unexpected number of key indicators"
            );
        }
        debug!(
            classification = %result.classification,
            confidence = result.confidence_score.value(),
            "analysis parsed"
        );
        Ok(result)
    }
}
