//! Proxy Tunnel Configuration and Data Types

use crate::core::network::types::{Endpoint, ProxyCredentials};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Protocol spoken to the proxy itself (not to the tunnelled target)
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProxyProtocol {
    /// Plain TCP to the proxy
    Http,
    /// TLS to the proxy, certificate verification disabled
    Https,
}

impl ProxyProtocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProxyProtocol::Http => "http",
            ProxyProtocol::Https => "https",
        }
    }
}

impl fmt::Display for ProxyProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unexpected protocol: {0}")]
pub struct UnsupportedProtocol(pub String);

impl FromStr for ProxyProtocol {
    type Err = UnsupportedProtocol;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(ProxyProtocol::Http),
            "https" => Ok(ProxyProtocol::Https),
            _ => Err(UnsupportedProtocol(token.to_string())),
        }
    }
}

/// Everything needed to reach a forward proxy
///
/// The protocol is kept as the raw caller-supplied token; it is validated by
/// the prober before any connection is attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxySettings {
    pub protocol: String,
    pub endpoint: Endpoint,
    pub credentials: Option<ProxyCredentials>,
}

impl ProxySettings {
    pub fn new(protocol: impl Into<String>, endpoint: Endpoint) -> Self {
        Self {
            protocol: protocol.into(),
            endpoint,
            credentials: None,
        }
    }

    pub fn with_credentials(mut self, credentials: Option<ProxyCredentials>) -> Self {
        self.credentials = credentials;
        self
    }
}

/// Probe transport options
///
/// Both timeouts default to `None`, leaving the operating system defaults in
/// charge. Callers that need a bounded pre-flight check opt in explicitly.
#[derive(Debug, Clone, Default)]
pub struct ProbeOptions {
    /// Timeout applied to each TCP connect attempt
    pub connect_timeout: Option<Duration>,
    /// Read/write timeout applied once connected (TLS handshake, CONNECT exchange)
    pub io_timeout: Option<Duration>,
}

impl ProbeOptions {
    /// Apply the same bound to connecting and to subsequent I/O
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            connect_timeout: Some(timeout),
            io_timeout: Some(timeout),
        }
    }
}
