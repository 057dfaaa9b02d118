//! Analysis Service
//!
//! Everything needed to turn a piece of article text into a validated
//! verdict: the `Analyzer` seam, the Gemini-backed client, credentials,
//! the fixed prompt material and the failure taxonomy.

pub mod client;
pub mod credentials;
pub mod error;
pub mod prompt;

use async_trait::async_trait;
use veritas_core::AnalysisResult;

pub use client::AnalysisClient;
pub use credentials::CredentialSource;
pub use error::{AnalysisError, ClientResult};
pub use prompt::{SampleKind, SAMPLE_FAKE_NEWS, SAMPLE_REAL_NEWS, SYSTEM_INSTRUCTION};

/// Anything that can classify a piece of text.
///
/// Implementations make exactly one attempt per call and return every
/// failure to the caller.
#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, text: &str) -> ClientResult<AnalysisResult>;
}
