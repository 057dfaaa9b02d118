//! Services
//!
//! Business logic services for the application.
//! Services handle the core functionality and are called by commands.

pub mod analysis;
pub mod session;

pub use analysis::{AnalysisClient, AnalysisError, Analyzer, CredentialSource, SampleKind};
pub use session::SessionController;
