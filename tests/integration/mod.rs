//! Integration Tests Module
//!
//! End-to-end tests for Veritas: the session controller driven through the
//! real analysis client, concurrency of submissions, and the Gemini wire
//! format against a local stub server.

mod support;

// Session lifecycle through AnalysisClient with a scripted provider
mod session_test;

// In-flight guard and concurrent submissions
mod concurrency_test;

// Gemini request/response wire format over HTTP
mod gemini_wire_test;
