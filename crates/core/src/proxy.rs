//! Proxy Configuration Types
//!
//! Data types for the optional outbound proxy used when talking to the
//! inference service. The actual HTTP client factory is in the `veritas-llm`
//! crate.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Proxy protocol type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProxyProtocol {
    Http,
    Https,
    Socks5,
}

impl ProxyProtocol {
    /// Return the URL scheme string for this protocol.
    pub fn scheme(&self) -> &'static str {
        match self {
            ProxyProtocol::Http => "http",
            ProxyProtocol::Https => "https",
            ProxyProtocol::Socks5 => "socks5",
        }
    }

    fn from_scheme(scheme: &str) -> Option<Self> {
        match scheme.to_ascii_lowercase().as_str() {
            "http" => Some(ProxyProtocol::Http),
            "https" => Some(ProxyProtocol::Https),
            "socks5" | "socks5h" => Some(ProxyProtocol::Socks5),
            _ => None,
        }
    }
}

/// Proxy configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProxyConfig {
    pub protocol: ProxyProtocol,
    pub host: String,
    pub port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Password is only held in memory; it is supplied through the
    /// environment and never written back to config.json.
    #[serde(skip_serializing, default)]
    pub password: Option<String>,
}

impl ProxyConfig {
    /// Parse a `scheme://[user[:pass]@]host:port` string.
    pub fn parse(raw: &str) -> CoreResult<Self> {
        let raw = raw.trim();
        let (scheme, rest) = raw
            .split_once("://")
            .ok_or_else(|| CoreError::config(format!("Proxy URL has no scheme: '{}'", raw)))?;
        let protocol = ProxyProtocol::from_scheme(scheme)
            .ok_or_else(|| CoreError::config(format!("Unsupported proxy scheme: '{}'", scheme)))?;
        let rest = rest.trim_end_matches('/');

        let (userinfo, address) = match rest.rsplit_once('@') {
            Some((userinfo, address)) => (Some(userinfo), address),
            None => (None, rest),
        };
        let (username, password) = match userinfo {
            None => (None, None),
            Some(userinfo) => {
                let (user, pass) = match userinfo.split_once(':') {
                    Some((user, pass)) => (user, Some(pass)),
                    None => (userinfo, None),
                };
                if user.is_empty() {
                    return Err(CoreError::config("Proxy URL has an empty username"));
                }
                (
                    Some(user.to_string()),
                    pass.filter(|p| !p.is_empty()).map(str::to_string),
                )
            }
        };

        let (host, port) = address
            .rsplit_once(':')
            .ok_or_else(|| CoreError::config(format!("Proxy URL has no port: '{}'", address)))?;
        if host.is_empty() {
            return Err(CoreError::config(format!("Proxy URL has no host: '{}'", address)));
        }
        let port = port
            .parse::<u16>()
            .map_err(|_| CoreError::config(format!("Invalid proxy port: '{}'", port)))?;

        Ok(Self {
            protocol,
            host: host.to_string(),
            port,
            username,
            password,
        })
    }

    /// Build the proxy URL string (without auth).
    pub fn url(&self) -> String {
        format!("{}://{}:{}", self.protocol.scheme(), self.host, self.port)
    }
}
