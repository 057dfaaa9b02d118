//! Gemini Provider
//!
//! Implementation of the LlmProvider trait for Google's Generative Language
//! API (`generateContent`). Requests carry a system instruction and a
//! response schema so the model answers with JSON of a fixed shape.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::provider::{missing_api_key_error, parse_http_error, LlmProvider};
use super::types::{
    LlmError, LlmRequestOptions, LlmResponse, LlmResult, ProviderConfig, StructuredRequest,
    UsageStats,
};
use crate::http_client::build_http_client;

/// Default Generative Language API root
const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini provider
pub struct GeminiProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Create a new Gemini provider with the given configuration
    pub fn new(config: ProviderConfig) -> LlmResult<Self> {
        let client = build_http_client(config.proxy.as_ref())?;
        Ok(Self { config, client })
    }

    /// Get the API base URL
    fn base_url(&self) -> &str {
        self.config
            .base_url
            .as_deref()
            .unwrap_or(GEMINI_API_URL)
            .trim_end_matches('/')
    }

    /// Full URL of a model-scoped endpoint, e.g. `models/gemini-2.5-flash:generateContent`.
    fn model_url(&self, suffix: &str) -> LlmResult<url::Url> {
        let raw = format!("{}/models/{}{}", self.base_url(), self.config.model, suffix);
        url::Url::parse(&raw).map_err(|e| LlmError::InvalidRequest {
            message: format!("invalid endpoint '{}': {}", raw, e),
        })
    }

    fn resolve_api_key<'a>(&'a self, options: &'a LlmRequestOptions) -> LlmResult<&'a str> {
        options
            .api_key_override
            .as_deref()
            .or(self.config.api_key.as_deref())
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| missing_api_key_error("gemini"))
    }

    /// Build the request body for the API
    fn build_request_body(
        &self,
        request: &StructuredRequest,
        options: &LlmRequestOptions,
    ) -> serde_json::Value {
        let mut generation_config = serde_json::json!({
            "responseMimeType": "application/json",
            "responseSchema": request.response_schema,
        });
        if let Some(temperature) = options.temperature_override.or(self.config.temperature) {
            generation_config["temperature"] = serde_json::json!(temperature);
        }

        serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": request.content }]
            }],
            "systemInstruction": {
                "parts": [{ "text": request.system_instruction }]
            },
            "generationConfig": generation_config,
        })
    }

    /// Convert the wire response into an `LlmResponse`.
    ///
    /// The text is the concatenation of every text part of the first
    /// candidate. A blocked prompt or an empty candidate list yields
    /// `content: None`.
    fn parse_response(&self, response: GeminiResponse) -> LlmResponse {
        let block_reason = response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason);

        let first = response.candidates.into_iter().next();
        let finish_reason = first
            .as_ref()
            .and_then(|c| c.finish_reason.clone())
            .or(block_reason);

        let text: String = first
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<Vec<_>>()
                    .concat()
            })
            .unwrap_or_default();

        let usage = response
            .usage_metadata
            .map(|u| UsageStats {
                input_tokens: u.prompt_token_count,
                output_tokens: u.candidates_token_count,
            })
            .unwrap_or_default();

        LlmResponse {
            content: if text.is_empty() { None } else { Some(text) },
            finish_reason,
            usage,
            model: response
                .model_version
                .unwrap_or_else(|| self.config.model.clone()),
        }
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn generate(
        &self,
        request: &StructuredRequest,
        options: LlmRequestOptions,
    ) -> LlmResult<LlmResponse> {
        let api_key = self.resolve_api_key(&options)?;
        let url = self.model_url(":generateContent")?;
        let body = self.build_request_body(request, &options);

        debug!(
            model = %self.config.model,
            content_chars = request.content.chars().count(),
            "sending generateContent request"
        );

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::NetworkError {
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(parse_http_error(status, &body, "gemini"));
        }

        let gemini_response: GeminiResponse =
            response.json().await.map_err(|e| LlmError::ParseError {
                message: e.to_string(),
            })?;

        let parsed = self.parse_response(gemini_response);
        debug!(
            finish_reason = ?parsed.finish_reason,
            output_tokens = parsed.usage.output_tokens,
            "generateContent response received"
        );
        Ok(parsed)
    }

    async fn health_check(&self, options: LlmRequestOptions) -> LlmResult<()> {
        let api_key = self.resolve_api_key(&options)?;
        let url = self.model_url("")?;

        let response = self
            .client
            .get(url)
            .header("x-goog-api-key", api_key)
            .send()
            .await
            .map_err(|e| LlmError::NetworkError {
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        if status == 200 {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(parse_http_error(status, &body, "gemini"))
        }
    }
}

/// Gemini API response format
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
    usage_metadata: Option<UsageMetadata>,
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}
