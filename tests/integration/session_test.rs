//! Session Integration Tests
//!
//! Drives `SessionController` through the real `AnalysisClient`, with only
//! the provider replaced:
//! - Sample article analyzed into a stored verdict and history entry
//! - Transport, format, empty-response and missing-key failures
//! - History ordering and eviction at the cap
//!
//! No network calls are made.

use std::sync::Arc;

use veritas::services::analysis::{
    AnalysisClient, CredentialSource, SampleKind, SAMPLE_REAL_NEWS,
};
use veritas::services::session::SessionController;
use veritas::SubmitOutcome;
use veritas_core::{Classification, EXCERPT_CHARS};
use veritas_llm::LlmError;

use crate::support::{verdict_json, ScriptedProvider};

// ============================================================================
// Helpers
// ============================================================================

fn session_with(provider: Arc<ScriptedProvider>) -> SessionController {
    let client = AnalysisClient::new(
        provider,
        CredentialSource::Fixed(Some("integration-key".to_string())),
    );
    SessionController::new(Arc::new(client))
}

fn ok_body(classification: &str, confidence: u8) -> Result<Option<String>, LlmError> {
    Ok(Some(verdict_json(classification, confidence).to_string()))
}

// ============================================================================
// Success path
// ============================================================================

#[tokio::test]
async fn test_real_sample_analysis() {
    let provider = ScriptedProvider::new(vec![ok_body("REAL", 88)]);
    let session = session_with(provider.clone());

    session.load_sample(SampleKind::Real).await;
    let outcome = session.submit().await;
    assert_eq!(outcome, SubmitOutcome::Completed);

    let view = session.snapshot().await;
    let result = view.result.expect("result stored");
    assert_eq!(result.classification, Classification::Real);
    assert_eq!(result.confidence_score.value(), 88);
    assert!(view.error.is_none());
    assert!(!view.is_analyzing);

    assert_eq!(view.history.len(), 1);
    let entry = &view.history[0];
    let expected: String = SAMPLE_REAL_NEWS.chars().take(EXCERPT_CHARS).collect();
    assert_eq!(entry.excerpt, format!("{}...", expected));
    assert_eq!(entry.result, result);
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_short_input_excerpt_has_no_ellipsis() {
    let session = session_with(ScriptedProvider::new(vec![ok_body("FAKE", 91)]));
    session.set_input("Aliens endorse candidate").await;
    session.submit().await;
    let history = session.history().await;
    assert_eq!(history[0].excerpt, "Aliens endorse candidate");
}

// ============================================================================
// Failure paths
// ============================================================================

#[tokio::test]
async fn test_transport_failure_surfaces_message() {
    let provider = ScriptedProvider::new(vec![Err(LlmError::NetworkError {
        message: "Network request failed".to_string(),
    })]);
    let session = session_with(provider);

    session.set_input("Some article").await;
    let outcome = session.submit().await;

    let view = session.snapshot().await;
    let error = view.error.expect("error stored");
    assert_eq!(outcome, SubmitOutcome::Failed(error.clone()));
    assert!(error.starts_with("Analysis failed. Please try again later."));
    assert!(error.contains("Network request failed"));
    assert!(view.result.is_none());
    assert!(view.history.is_empty());
    assert!(!view.is_analyzing);
}

#[tokio::test]
async fn test_missing_features_is_format_error() {
    let mut body = verdict_json("FAKE", 95);
    body.as_object_mut().unwrap().remove("features");
    let session = session_with(ScriptedProvider::new(vec![Ok(Some(body.to_string()))]));

    session.set_input("Some article").await;
    session.submit().await;

    let view = session.snapshot().await;
    let error = view.error.unwrap();
    assert!(error.contains("Invalid response format from analysis engine"));
    assert!(error.contains("features"));
    assert!(view.result.is_none());
    assert!(view.history.is_empty());
}

#[tokio::test]
async fn test_non_json_body_is_format_error() {
    let session = session_with(ScriptedProvider::new(vec![Ok(Some(
        "Sure! Here is my analysis: it's fake.".to_string(),
    ))]));
    session.set_input("Some article").await;
    session.submit().await;
    let error = session.snapshot().await.error.unwrap();
    assert!(error.contains("Invalid response format from analysis engine"));
}

#[tokio::test]
async fn test_empty_body_is_empty_response() {
    let session = session_with(ScriptedProvider::new(vec![Ok(None), Ok(Some("  ".to_string()))]));
    session.set_input("Some article").await;

    for _ in 0..2 {
        session.submit().await;
        let error = session.snapshot().await.error.unwrap();
        assert_eq!(
            error,
            "Analysis failed. Please try again later. Empty response from AI model."
        );
    }
}

#[tokio::test]
async fn test_missing_key_fails_before_network() {
    let provider = ScriptedProvider::new(vec![ok_body("REAL", 80)]);
    let client = AnalysisClient::new(provider.clone(), CredentialSource::Fixed(None));
    let session = SessionController::new(Arc::new(client));

    session.set_input("Some article").await;
    session.submit().await;

    let error = session.snapshot().await.error.unwrap();
    assert!(error.contains("API Key is missing"));
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_blank_input_never_reaches_provider() {
    let provider = ScriptedProvider::new(vec![]);
    let session = session_with(provider.clone());
    session.set_input("   \n  ").await;
    let outcome = session.submit().await;
    assert_eq!(
        outcome,
        SubmitOutcome::Rejected("Please enter some text to analyze.".to_string())
    );
    assert_eq!(provider.calls(), 0);
}

// ============================================================================
// History
// ============================================================================

#[tokio::test]
async fn test_two_submissions_most_recent_first() {
    let session = session_with(ScriptedProvider::new(vec![
        ok_body("REAL", 80),
        ok_body("FAKE", 92),
    ]));

    session.set_input("first story").await;
    session.submit().await;
    session.set_input("second story").await;
    session.submit().await;

    let history = session.history().await;
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].excerpt, "second story");
    assert_eq!(history[0].result.classification, Classification::Fake);
    assert_eq!(history[1].excerpt, "first story");
    assert_ne!(history[0].id, history[1].id);
    assert!(history[0].timestamp >= history[1].timestamp);
}

#[tokio::test]
async fn test_sixth_entry_evicts_oldest() {
    let answers = (0..6).map(|i| ok_body("UNCERTAIN", 50 + i)).collect();
    let session = session_with(ScriptedProvider::new(answers));

    for i in 1..=6 {
        session.set_input(format!("story {}", i)).await;
        session.submit().await;
    }

    let history = session.history().await;
    assert_eq!(history.len(), 5);
    let excerpts: Vec<&str> = history.iter().map(|h| h.excerpt.as_str()).collect();
    assert_eq!(
        excerpts,
        vec!["story 6", "story 5", "story 4", "story 3", "story 2"]
    );
}

#[tokio::test]
async fn test_failure_leaves_history_untouched() {
    let session = session_with(ScriptedProvider::new(vec![
        ok_body("REAL", 80),
        Err(LlmError::ServerError {
            message: "overloaded".to_string(),
            status: Some(503),
        }),
    ]));

    session.set_input("kept").await;
    session.submit().await;
    let before = session.history().await;

    session.set_input("dropped").await;
    session.submit().await;
    assert_eq!(session.history().await, before);
}
