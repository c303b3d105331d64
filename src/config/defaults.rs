// Built-in defaults, matching the installer's historical flag defaults

use super::types::ConnectConfig;
use crate::core::network::proxy_url::DEFAULT_PROXY_PORT;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 80;
pub const DEFAULT_PROXY_PROTOCOL: &str = "http";

impl Default for ConnectConfig {
    fn default() -> Self {
        ConnectConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            proxy_protocol: DEFAULT_PROXY_PROTOCOL.to_string(),
            proxy_host: None,
            proxy_port: DEFAULT_PROXY_PORT,
            proxy_user: None,
            proxy_pass: None,
            timeout_ms: None,
        }
    }
}
