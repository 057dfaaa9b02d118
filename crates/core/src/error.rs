//! Core Error Types
//!
//! Errors raised while building or validating the verdict model, history and
//! proxy settings. Only thiserror and serde_json are involved, so the
//! inference stack never leaks in here.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid setting (history cap, proxy URL)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Payload did not deserialize into the verdict shape
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Payload deserialized but a field failed a content check
    #[error("Validation error: {0}")]
    Validation(String),

    /// A numeric score fell outside 0..=100 or was not finite
    #[error("Score out of range: {0}")]
    ScoreOutOfRange(f64),
}

pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_display() {
        let err = CoreError::config("history limit must be at least 1");
        assert_eq!(
            err.to_string(),
            "Configuration error: history limit must be at least 1"
        );
    }

    #[test]
    fn test_score_out_of_range_display() {
        let err = CoreError::ScoreOutOfRange(140.0);
        assert_eq!(err.to_string(), "Score out of range: 140");
    }

    #[test]
    fn test_serde_error_converts() {
        let err: CoreError = serde_json::from_str::<u8>("\"x\"").unwrap_err().into();
        assert!(err.to_string().starts_with("Serialization error:"));
    }
}
