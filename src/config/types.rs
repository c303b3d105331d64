use crate::core::network::proxy_tunnel::{ProbeOptions, ProxySettings};
use crate::core::network::types::{Endpoint, ProxyCredentials};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Top-level configuration (`~/.nettool.toml`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NettoolConfig {
    pub connect: ConnectConfig,
    pub logging: LoggingConfig,
}

/// Inputs of the `connect` command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ConnectConfig {
    /// Target host to reach
    pub host: String,
    /// Target port
    pub port: u16,
    /// "http" | "https"; validated by the prober
    pub proxy_protocol: String,
    /// Proxy host; when unset or empty the target is probed directly
    pub proxy_host: Option<String>,
    pub proxy_port: u16,
    pub proxy_user: Option<String>,
    pub proxy_pass: Option<String>,
    /// Optional bound on connect and I/O; OS defaults apply when unset
    pub timeout_ms: Option<u64>,
}

/// Debug logging options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "kebab-case")]
pub struct LoggingConfig {
    /// Write JSON Lines debug log entries
    pub debug: bool,
    /// Log file location, defaults to `~/.nettool/nettool-debug.log`
    pub log_file: Option<PathBuf>,
    /// Mirror debug entries to stderr
    pub echo_stderr: bool,
}

impl ConnectConfig {
    pub fn target(&self) -> Endpoint {
        Endpoint::new(self.host.clone(), self.port)
    }

    /// Proxy settings, or `None` for a direct probe
    pub fn proxy(&self) -> Option<ProxySettings> {
        let host = self.proxy_host.as_deref().filter(|h| !h.is_empty())?;
        let credentials =
            ProxyCredentials::from_parts(self.proxy_user.as_deref(), self.proxy_pass.as_deref());

        Some(
            ProxySettings::new(self.proxy_protocol.clone(), Endpoint::new(host, self.proxy_port))
                .with_credentials(credentials),
        )
    }

    pub fn probe_options(&self) -> ProbeOptions {
        match self.timeout_ms {
            Some(ms) if ms > 0 => ProbeOptions::with_timeout(Duration::from_millis(ms)),
            _ => ProbeOptions::default(),
        }
    }
}
