//! Concurrency Integration Tests
//!
//! At most one submission may be in flight:
//! - A second submit while the first is pending is rejected without a call
//! - The in-flight flag is cleared when the analyzer panics
//! - The in-flight flag is cleared when the submission task is aborted

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Notify;

use veritas::services::analysis::{Analyzer, ClientResult};
use veritas::services::session::SessionController;
use veritas::{AppError, SubmitOutcome};
use veritas_core::AnalysisResult;

use crate::support::verdict_json;

/// Analyzer that blocks until released.
struct GatedAnalyzer {
    started: Notify,
    release: Notify,
    calls: AtomicUsize,
}

impl GatedAnalyzer {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            started: Notify::new(),
            release: Notify::new(),
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl Analyzer for GatedAnalyzer {
    async fn analyze(&self, _text: &str) -> ClientResult<AnalysisResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.started.notify_one();
        self.release.notified().await;
        Ok(AnalysisResult::from_json(&verdict_json("REAL", 77).to_string()).unwrap())
    }
}

struct PanickingAnalyzer;

#[async_trait]
impl Analyzer for PanickingAnalyzer {
    async fn analyze(&self, _text: &str) -> ClientResult<AnalysisResult> {
        panic!("analyzer blew up");
    }
}

#[tokio::test]
async fn test_second_submit_while_pending_is_busy() {
    let analyzer = GatedAnalyzer::new();
    let session = Arc::new(SessionController::new(analyzer.clone()));
    session.set_input("pending article").await;

    let first = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.submit().await })
    };
    analyzer.started.notified().await;

    assert!(session.is_analyzing());
    let view = session.snapshot().await;
    assert!(view.is_analyzing);
    assert!(!view.can_submit);

    assert_eq!(session.submit().await, SubmitOutcome::Busy);
    assert!(matches!(session.restore("anything").await, Err(AppError::Busy)));
    assert_eq!(analyzer.calls.load(Ordering::SeqCst), 1);

    analyzer.release.notify_one();
    assert_eq!(first.await.unwrap(), SubmitOutcome::Completed);

    let view = session.snapshot().await;
    assert!(!view.is_analyzing);
    assert!(view.can_submit);
    assert_eq!(view.history.len(), 1);
    assert_eq!(view.result.unwrap().confidence_score.value(), 77);
}

#[tokio::test]
async fn test_edits_allowed_while_pending() {
    let analyzer = GatedAnalyzer::new();
    let session = Arc::new(SessionController::new(analyzer.clone()));
    session.set_input("original").await;

    let first = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.submit().await })
    };
    analyzer.started.notified().await;

    session.set_input("edited meanwhile").await;
    analyzer.release.notify_one();
    first.await.unwrap();

    let view = session.snapshot().await;
    assert_eq!(view.input_text, "edited meanwhile");
    assert_eq!(view.history[0].excerpt, "original");
}

#[tokio::test]
async fn test_panicking_analyzer_clears_flag() {
    let session = Arc::new(SessionController::new(Arc::new(PanickingAnalyzer)));
    session.set_input("text").await;

    let handle = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.submit().await })
    };
    assert!(handle.await.unwrap_err().is_panic());
    assert!(!session.is_analyzing());
}

#[tokio::test]
async fn test_aborted_submission_clears_flag() {
    let analyzer = GatedAnalyzer::new();
    let session = Arc::new(SessionController::new(analyzer.clone()));
    session.set_input("text").await;

    let handle = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.submit().await })
    };
    analyzer.started.notified().await;
    assert!(session.is_analyzing());

    handle.abort();
    assert!(handle.await.unwrap_err().is_cancelled());
    assert!(!session.is_analyzing());
    assert!(session.history().await.is_empty());
}
