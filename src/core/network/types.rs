// Core types for connectivity probing
use std::fmt;
use std::net::Ipv6Addr;

/// A TCP destination: the probe target or the proxy itself
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Endpoint {
    /// Host name or IP literal. IPv6 literals may be stored with or without brackets.
    pub host: String,
    pub port: u16,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Host without IPv6 brackets, suitable for name resolution and TLS server names
    pub fn bare_host(&self) -> &str {
        self.host
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .unwrap_or(&self.host)
    }

    /// Host rendered so that it can be followed by `:port` unambiguously
    pub fn display_host(&self) -> String {
        let bare = self.bare_host();
        if bare.parse::<Ipv6Addr>().is_ok() {
            format!("[{}]", bare)
        } else {
            bare.to_string()
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.display_host(), self.port)
    }
}

/// Proxy user/password pair
#[derive(Clone, PartialEq, Eq, Default)]
pub struct ProxyCredentials {
    pub user: String,
    pub pass: String,
}

impl ProxyCredentials {
    pub fn new(user: impl Into<String>, pass: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            pass: pass.into(),
        }
    }

    /// Build credentials from optional user/pass values, treating empty strings as missing.
    /// Returns `None` when both are absent (anonymous access).
    pub fn from_parts(user: Option<&str>, pass: Option<&str>) -> Option<Self> {
        let user = user.unwrap_or_default();
        let pass = pass.unwrap_or_default();
        if user.is_empty() && pass.is_empty() {
            None
        } else {
            Some(Self::new(user, pass))
        }
    }

    /// Only complete credentials (both parts non-empty) are ever presented to a proxy
    pub fn is_complete(&self) -> bool {
        !self.user.is_empty() && !self.pass.is_empty()
    }
}

// Never print the password, even in debug output
impl fmt::Debug for ProxyCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyCredentials")
            .field("user", &self.user)
            .field("pass", &"[REDACTED]")
            .finish()
    }
}

/// Tri-state probe result, mapped to the installer's exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ProbeOutcome {
    /// Target reachable (directly, or through an established tunnel)
    Success,
    /// Direct TCP connection to the target failed
    DirectConnectFailure,
    /// Proxy unreachable, or reachable but the CONNECT tunnel was not established
    ProxyTunnelFailure,
}

impl ProbeOutcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            ProbeOutcome::Success => 0,
            ProbeOutcome::DirectConnectFailure => 2,
            ProbeOutcome::ProxyTunnelFailure => 3,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Success)
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Success => write!(f, "success"),
            ProbeOutcome::DirectConnectFailure => write!(f, "direct_connect_failure"),
            ProbeOutcome::ProxyTunnelFailure => write!(f, "proxy_tunnel_failure"),
        }
    }
}

/// Detailed information about a single probe, for diagnostics and debug logging
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ProbeDetail {
    /// "direct" | "proxy"
    pub mode: String,
    /// Target host:port
    pub target: String,
    /// Proxy host:port (proxy mode only)
    pub proxy: Option<String>,
    /// First line returned by the proxy, whitespace-trimmed
    pub status_line: Option<String>,
    /// Timestamp when the probe started
    pub checked_at: String,
    /// Total probe duration in milliseconds
    pub response_time_ms: u64,
}
