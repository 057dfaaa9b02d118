//! Veritas Core
//!
//! Foundational error types, proxy configuration and the verdict data model
//! for the Veritas workspace. This crate has zero dependencies on the HTTP
//! stack or the inference provider.
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `proxy` - Proxy configuration data types shared across workspace crates
//! - `verdict` - Range-checked verdict types (`Classification`, `Score`, `AnalysisResult`)
//! - `history` - Bounded newest-first session history

pub mod error;
pub mod history;
pub mod proxy;
pub mod verdict;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Proxy Types ────────────────────────────────────────────────────────
pub use proxy::{ProxyConfig, ProxyProtocol};

// ── Verdict Model ──────────────────────────────────────────────────────
pub use verdict::{AnalysisResult, Classification, LinguisticFeatures, Score};

// ── History ────────────────────────────────────────────────────────────
pub use history::{excerpt, History, HistoryItem, DEFAULT_HISTORY_LIMIT, EXCERPT_CHARS};
