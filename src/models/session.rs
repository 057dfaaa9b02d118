//! Session View Models
//!
//! Serializable snapshot of the session state handed to the front-end.

use serde::{Deserialize, Serialize};
use veritas_core::{AnalysisResult, HistoryItem};

/// Point-in-time copy of everything the front-end renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
    pub input_text: String,
    pub is_analyzing: bool,
    pub result: Option<AnalysisResult>,
    pub error: Option<String>,
    /// Newest first
    pub history: Vec<HistoryItem>,
    pub history_limit: usize,
    /// Whether the analyze action is currently enabled
    pub can_submit: bool,
}

/// How a `submit` call ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// A verdict was stored and added to history
    Completed,
    /// The analysis call failed; the message is now the session error
    Failed(String),
    /// Blank input; the service was not called
    Rejected(String),
    /// Another submission is still in flight
    Busy,
}

impl SubmitOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, SubmitOutcome::Completed)
    }
}
