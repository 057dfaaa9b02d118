//! Storage Layer
//!
//! Only the configuration file is persisted; session history is in-memory.

pub mod config;

pub use config::ConfigService;
