//! nettool: installer pre-flight network checks
//!
//! - [`core::network::proxy_tunnel`]: direct TCP and HTTP CONNECT tunnel probes
//! - [`core::network::proxy_url`]: proxy URL normalization
//! - [`config`] / [`cli`]: the `nettool` binary's configuration surface

pub mod cli;
pub mod config;
pub mod core;
