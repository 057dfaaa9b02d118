//! Session Controller
//!
//! Owns the front-end facing state (input, in-flight flag, current result,
//! current error, bounded history) and sequences calls to the analyzer.
//!
//! Lifecycle: Idle -> Analyzing -> (Success | Failed) -> Idle, driven only by
//! `submit`. At most one submission is in flight at a time; a second
//! `submit` while one is running returns `SubmitOutcome::Busy` without
//! touching the analyzer.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use veritas_core::{AnalysisResult, History, HistoryItem};

use crate::models::session::{SessionView, SubmitOutcome};
use crate::services::analysis::{AnalysisError, Analyzer, SampleKind};
use crate::utils::error::{AppError, AppResult};

/// Mutable session state. Only ever touched through `SessionController`.
#[derive(Debug, Default)]
struct SessionState {
    input_text: String,
    current_result: Option<AnalysisResult>,
    current_error: Option<String>,
    history: History,
}

/// Holds the in-flight flag for the lifetime of one submission and clears it
/// on drop, including when the analyzer future panics or is dropped.
#[derive(Debug)]
pub struct InFlightGuard {
    flag: Arc<AtomicBool>,
}

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self {
                flag: Arc::clone(flag),
            })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

pub struct SessionController {
    analyzer: Arc<dyn Analyzer>,
    state: RwLock<SessionState>,
    in_flight: Arc<AtomicBool>,
}

impl SessionController {
    /// New session with the default history cap.
    pub fn new(analyzer: Arc<dyn Analyzer>) -> Self {
        Self::with_history(analyzer, History::default())
    }

    /// New session with a custom history cap.
    pub fn with_history_limit(analyzer: Arc<dyn Analyzer>, limit: usize) -> AppResult<Self> {
        Ok(Self::with_history(analyzer, History::with_limit(limit)?))
    }

    fn with_history(analyzer: Arc<dyn Analyzer>, history: History) -> Self {
        Self {
            analyzer,
            state: RwLock::new(SessionState {
                history,
                ..Default::default()
            }),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_analyzing(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Replace the input text. Nothing else changes.
    pub async fn set_input(&self, text: impl Into<String>) {
        self.state.write().await.input_text = text.into();
    }

    /// Append a line to the input text.
    pub async fn append_input(&self, line: &str) {
        let mut state = self.state.write().await;
        if !state.input_text.is_empty() {
            state.input_text.push('\n');
        }
        state.input_text.push_str(line);
    }

    /// Take the in-flight slot without starting anything yet. `None` while
    /// another submission holds it.
    pub fn try_reserve(&self) -> Option<InFlightGuard> {
        InFlightGuard::acquire(&self.in_flight)
    }

    /// Submit the current input for analysis.
    pub async fn submit(&self) -> SubmitOutcome {
        let Some(guard) = self.try_reserve() else {
            warn!("submission ignored: analysis already in progress");
            return SubmitOutcome::Busy;
        };
        self.submit_reserved(guard).await
    }

    /// Submit using a slot already taken with `try_reserve`. The slot is
    /// released when this returns.
    pub async fn submit_reserved(&self, guard: InFlightGuard) -> SubmitOutcome {
        if !Arc::ptr_eq(&guard.flag, &self.in_flight) {
            warn!("submission ignored: slot belongs to another session");
            return SubmitOutcome::Busy;
        }
        let _guard = guard;

        let text = {
            let mut state = self.state.write().await;
            if state.input_text.trim().is_empty() {
                let message = AnalysisError::blank_input().user_message();
                state.current_result = None;
                state.current_error = Some(message.clone());
                debug!("submission rejected: blank input");
                return SubmitOutcome::Rejected(message);
            }
            state.current_error = None;
            state.current_result = None;
            state.input_text.clone()
        };

        // The only suspension point; no lock is held across it.
        let outcome = self.analyzer.analyze(&text).await;

        let mut state = self.state.write().await;
        match outcome {
            Ok(result) => {
                let now_ms = chrono::Utc::now().timestamp_millis();
                let (entry, evicted) = state.history.record(now_ms, &text, result.clone());
                info!(
                    id = %entry.id,
                    classification = %result.classification,
                    confidence = result.confidence_score.value(),
                    "analysis completed"
                );
                if !evicted.is_empty() {
                    debug!(evicted = evicted.len(), "history cap reached, oldest entries dropped");
                }
                state.current_error = None;
                state.current_result = Some(result);
                SubmitOutcome::Completed
            }
            Err(err) => {
                warn!(kind = err.kind(), error = %err, "analysis failed");
                let message = err.user_message();
                state.current_result = None;
                state.current_error = Some(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }

    /// Load one of the built-in sample articles, clearing result and error.
    pub async fn load_sample(&self, kind: SampleKind) {
        let mut state = self.state.write().await;
        state.input_text = kind.text().to_string();
        state.current_result = None;
        state.current_error = None;
    }

    /// Reset input, result and error. History is kept.
    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        state.input_text.clear();
        state.current_result = None;
        state.current_error = None;
    }

    /// Bring a past verdict back into view. Input and history are untouched.
    pub async fn restore(&self, id: &str) -> AppResult<HistoryItem> {
        if self.is_analyzing() {
            return Err(AppError::Busy);
        }
        let mut state = self.state.write().await;
        let item = state
            .history
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("history entry {}", id)))?;
        state.current_result = Some(item.result.clone());
        state.current_error = None;
        Ok(item)
    }

    /// Restore by newest-first position (0 is the most recent).
    pub async fn restore_nth(&self, index: usize) -> AppResult<HistoryItem> {
        let id = {
            let state = self.state.read().await;
            state
                .history
                .nth(index)
                .map(|item| item.id.clone())
                .ok_or_else(|| AppError::not_found(format!("history position {}", index + 1)))?
        };
        self.restore(&id).await
    }

    pub async fn history(&self) -> Vec<HistoryItem> {
        self.state.read().await.history.items().to_vec()
    }

    pub async fn snapshot(&self) -> SessionView {
        let is_analyzing = self.is_analyzing();
        let state = self.state.read().await;
        SessionView {
            input_text: state.input_text.clone(),
            is_analyzing,
            result: state.current_result.clone(),
            error: state.current_error.clone(),
            history: state.history.items().to_vec(),
            history_limit: state.history.limit(),
            can_submit: !is_analyzing && !state.input_text.trim().is_empty(),
        }
    }
}
