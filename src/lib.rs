//! Veritas - fake news analysis client
//!
//! Sends article text to a hosted language model with a fixed instruction and
//! response schema, validates the structured verdict and keeps a short
//! in-session history. It includes:
//! - Command handlers for the terminal front-end
//! - The analysis client and session controller
//! - Config storage, data models and utilities

pub mod commands;
pub mod models;
pub mod render;
pub mod repl;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

pub use commands::Command;
pub use models::response::*;
pub use models::session::{SessionView, SubmitOutcome};
pub use models::settings::{AppConfig, SettingsUpdate};
pub use services::analysis::{AnalysisClient, AnalysisError, Analyzer, SampleKind};
pub use services::session::SessionController;
pub use state::AppState;
pub use utils::error::{AppError, AppResult};
