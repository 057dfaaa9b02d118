//! API key lookup, performed on every call.

/// Fallback variable checked when the configured one is unset.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Where the API key comes from.
#[derive(Debug, Clone)]
pub enum CredentialSource {
    /// Read from the process environment at call time. The first variable
    /// holding a non-blank value wins.
    Env(Vec<String>),
    /// A fixed value (or fixed absence).
    Fixed(Option<String>),
}

impl CredentialSource {
    /// Environment lookup of `primary`, then `GEMINI_API_KEY`.
    pub fn env(primary: impl Into<String>) -> Self {
        let primary = primary.into();
        let mut vars = vec![primary.clone()];
        if primary != GEMINI_API_KEY_ENV {
            vars.push(GEMINI_API_KEY_ENV.to_string());
        }
        Self::Env(vars)
    }

    /// Current key, if any. Blank values count as absent.
    pub fn resolve(&self) -> Option<String> {
        match self {
            CredentialSource::Env(vars) => vars
                .iter()
                .filter_map(|var| std::env::var(var).ok())
                .find(|value| !value.trim().is_empty()),
            CredentialSource::Fixed(value) => value
                .as_ref()
                .filter(|v| !v.trim().is_empty())
                .cloned(),
        }
    }

    /// Human-readable description for error messages (never the key itself).
    pub fn describe(&self) -> String {
        match self {
            CredentialSource::Env(vars) => vars.join(" or "),
            CredentialSource::Fixed(_) => "configured key".to_string(),
        }
    }
}
