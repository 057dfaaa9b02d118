//! Veritas LLM
//!
//! Provides a provider-agnostic interface for schema-constrained JSON
//! generation, the Gemini implementation of it, and the HTTP client factory.

pub mod gemini;
pub mod http_client;
pub mod provider;
pub mod types;

// Re-export main types
pub use gemini::GeminiProvider;
pub use http_client::build_http_client;
pub use provider::LlmProvider;
pub use types::*;
