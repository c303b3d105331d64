pub mod debug_logger;
pub mod proxy_tunnel;
pub mod proxy_url;
pub mod types;

// Re-export commonly used items
pub use debug_logger::EnhancedDebugLogger;
pub use proxy_tunnel::{ProbeError, ProbeReport, Prober, ProxyProtocol, ProxySettings};
pub use proxy_url::{parse_proxy_url, ParsedProxyUrl, ProxyUrlError};
pub use types::*;
