//! Shared fixtures for the integration tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use veritas_llm::{
    LlmProvider, LlmRequestOptions, LlmResponse, LlmResult, ProviderConfig, StructuredRequest,
    UsageStats,
};

/// A well-formed verdict body as the service would return it.
pub fn verdict_json(classification: &str, confidence: u8) -> serde_json::Value {
    json!({
        "classification": classification,
        "confidenceScore": confidence,
        "summary": "Neutral, sourced reporting with specific figures.",
        "features": {
            "emotionalTone": 15,
            "sensationalism": 10,
            "factuality": 90,
            "sourceCredibility": 85,
            "biasLevel": 12
        },
        "keyIndicators": ["Named journal", "Specific figures", "Neutral tone"],
        "svmVectorAnalysis": "Formal vocabulary placed the sample on the Real side of the margin."
    })
}

/// Provider that answers each call with the next scripted outcome.
pub struct ScriptedProvider {
    config: ProviderConfig,
    answers: Mutex<VecDeque<LlmResult<Option<String>>>>,
    calls: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new(answers: Vec<LlmResult<Option<String>>>) -> Arc<Self> {
        Arc::new(Self {
            config: ProviderConfig::default(),
            answers: Mutex::new(answers.into()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn generate(
        &self,
        _request: &StructuredRequest,
        _options: LlmRequestOptions,
    ) -> LlmResult<LlmResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let answer = self
            .answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(None));
        answer.map(|content| LlmResponse {
            content,
            finish_reason: Some("STOP".to_string()),
            usage: UsageStats::default(),
            model: self.config.model.clone(),
        })
    }

    async fn health_check(&self, _options: LlmRequestOptions) -> LlmResult<()> {
        Ok(())
    }
}
