//! Analysis Errors
//!
//! Failure kinds of a single analysis call, plus the local validation error
//! raised before any call is attempted.

use thiserror::Error;
use veritas_llm::LlmError;

/// Message shown when a blank input is submitted.
pub const BLANK_INPUT_MESSAGE: &str = "Please enter some text to analyze.";

/// Prefix applied to every failure surfaced to the user.
pub const FAILURE_PREFIX: &str = "Analysis failed. Please try again later.";

#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Required credential is absent; raised before any network attempt
    #[error("API Key is missing. Please check your environment variables ({0}).")]
    Configuration(String),

    /// The service answered but produced no content
    #[error("Empty response from AI model.")]
    EmptyResponse,

    /// Content was not the expected shape or failed field validation
    #[error("Invalid response format from analysis engine: {0}")]
    Format(String),

    /// The call itself failed (network, auth, rate limit, server error)
    #[error("{0}")]
    Transport(#[from] LlmError),

    /// Blank input submitted
    #[error("{0}")]
    Validation(String),
}

pub type ClientResult<T> = Result<T, AnalysisError>;

impl AnalysisError {
    pub fn blank_input() -> Self {
        Self::Validation(BLANK_INPUT_MESSAGE.to_string())
    }

    /// Short machine-readable kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AnalysisError::Configuration(_) => "configuration",
            AnalysisError::EmptyResponse => "empty_response",
            AnalysisError::Format(_) => "format",
            AnalysisError::Transport(_) => "transport",
            AnalysisError::Validation(_) => "validation",
        }
    }

    /// The single user-visible message for this failure.
    ///
    /// Validation messages are shown as-is; everything else gets the generic
    /// failure framing followed by the underlying cause.
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::Validation(message) => message.clone(),
            other => format!("{} {}", FAILURE_PREFIX, other),
        }
    }
}
