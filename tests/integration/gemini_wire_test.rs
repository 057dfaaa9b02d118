//! Gemini Wire Integration Tests
//!
//! Runs `AnalysisClient` over a real `GeminiProvider` against a one-shot
//! HTTP stub bound to localhost:
//! - Request path, key header and structured-output fields
//! - Candidate text parsed into a verdict
//! - Error envelopes mapped to user-facing messages

use std::sync::Arc;

use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use veritas::services::analysis::{AnalysisClient, AnalysisError, Analyzer, CredentialSource};
use veritas_core::Classification;
use veritas_llm::{GeminiProvider, LlmError, ProviderConfig};

use crate::support::verdict_json;

// ============================================================================
// Stub server
// ============================================================================

/// A captured HTTP request.
struct Captured {
    /// Request line and headers, lowercased
    head: String,
    body: serde_json::Value,
}

fn header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n").map(|p| p + 4)
}

/// Serve exactly one response, returning the base URL and the captured request.
async fn serve_once(
    status: &'static str,
    response_body: String,
) -> (String, oneshot::Receiver<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        let head_len = loop {
            let n = socket.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed before headers");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(end) = header_end(&buf) {
                break end;
            }
        };
        let head = String::from_utf8_lossy(&buf[..head_len]).to_ascii_lowercase();
        let content_length = head
            .lines()
            .find_map(|l| l.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        while buf.len() < head_len + content_length {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }
        let body = serde_json::from_slice(&buf[head_len..]).unwrap_or(serde_json::Value::Null);

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            response_body.len(),
            response_body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        let _ = tx.send(Captured { head, body });
    });

    (format!("http://{}/v1beta", addr), rx)
}

fn client_for(base_url: String) -> AnalysisClient {
    let provider = GeminiProvider::new(ProviderConfig {
        base_url: Some(base_url),
        ..Default::default()
    })
    .unwrap();
    AnalysisClient::new(
        Arc::new(provider),
        CredentialSource::Fixed(Some("wire-test-key".to_string())),
    )
}

fn candidate(text: &str) -> String {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }],
        "usageMetadata": { "promptTokenCount": 120, "candidatesTokenCount": 80 },
        "modelVersion": "gemini-2.5-flash"
    })
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_request_shape_and_verdict() {
    let verdict = verdict_json("REAL", 88).to_string();
    let (base_url, captured) = serve_once("200 OK", candidate(&verdict)).await;

    let result = client_for(base_url)
        .analyze("Scientists publish peer-reviewed findings.")
        .await
        .unwrap();
    assert_eq!(result.classification, Classification::Real);
    assert_eq!(result.confidence_score.value(), 88);

    let request = captured.await.unwrap();
    assert!(request
        .head
        .starts_with("post /v1beta/models/gemini-2.5-flash:generatecontent "));
    assert!(request.head.contains("x-goog-api-key: wire-test-key"));

    let body = request.body;
    assert_eq!(
        body["contents"][0]["parts"][0]["text"],
        "Scientists publish peer-reviewed findings."
    );
    assert!(body["systemInstruction"]["parts"][0]["text"]
        .as_str()
        .unwrap()
        .contains("SVM (Support Vector Machine) classification"));
    let config = &body["generationConfig"];
    assert_eq!(config["responseMimeType"], "application/json");
    assert_eq!(config["responseSchema"]["type"], "OBJECT");
    assert_eq!(
        config["responseSchema"]["properties"]["classification"]["enum"],
        json!(["REAL", "FAKE", "UNCERTAIN"])
    );
}

#[tokio::test]
async fn test_split_parts_are_concatenated() {
    let verdict = verdict_json("FAKE", 90).to_string();
    let (head, tail) = verdict.split_at(verdict.len() / 2);
    let response = json!({
        "candidates": [{
            "content": { "parts": [{ "text": head }, { "text": tail }] },
            "finishReason": "STOP"
        }]
    })
    .to_string();
    let (base_url, _captured) = serve_once("200 OK", response).await;

    let result = client_for(base_url).analyze("text").await.unwrap();
    assert_eq!(result.classification, Classification::Fake);
}

#[tokio::test]
async fn test_blocked_prompt_is_empty_response() {
    let response = json!({ "promptFeedback": { "blockReason": "SAFETY" } }).to_string();
    let (base_url, _captured) = serve_once("200 OK", response).await;

    let err = client_for(base_url).analyze("text").await.unwrap_err();
    assert!(matches!(err, AnalysisError::EmptyResponse));
}

#[tokio::test]
async fn test_rate_limit_envelope() {
    let response = json!({
        "error": {
            "code": 429,
            "message": "Resource has been exhausted (e.g. check quota).",
            "status": "RESOURCE_EXHAUSTED"
        }
    })
    .to_string();
    let (base_url, _captured) = serve_once("429 Too Many Requests", response).await;

    let err = client_for(base_url).analyze("text").await.unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::Transport(LlmError::RateLimited { .. })
    ));
    let message = err.user_message();
    assert!(message.starts_with("Analysis failed. Please try again later."));
    assert!(message.contains("Resource has been exhausted"));
}

#[tokio::test]
async fn test_unreachable_service_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client_for(format!("http://{}/v1beta", addr))
        .analyze("text")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::Transport(LlmError::NetworkError { .. })
    ));
}
