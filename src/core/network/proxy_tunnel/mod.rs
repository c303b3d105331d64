//! Proxy Tunnel Probing Module
//!
//! Reachability checks used before deploying software:
//! - Direct TCP connect to a target
//! - HTTP/1.0 CONNECT tunnel through an `http` or `https` forward proxy
//! - Optional Basic proxy authentication
//! - Tri-state outcome with installer exit codes (0 / 2 / 3)

pub mod config;
pub mod dialer;
pub mod request;
pub mod response;
pub mod prober;


// Re-export public API
pub use config::{ProbeOptions, ProxyProtocol, ProxySettings, UnsupportedProtocol};
pub use dialer::{Dialer, NetDialer, Transport};
pub use request::{basic_auth_value, build_connect_request};
pub use response::{
    is_tunnel_established, read_status_line, StatusLine, MAX_STATUS_LINE_BYTES,
    TUNNEL_ESTABLISHED_MARKER,
};
pub use prober::{ProbeError, ProbeErrorKind, ProbeReport, Prober};
