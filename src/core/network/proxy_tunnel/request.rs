//! CONNECT Request Construction
//!
//! Builds the minimal HTTP/1.0 CONNECT request understood by virtually every
//! forward proxy: a request line, an optional `Proxy-Authorization` header and
//! the blank line that ends the header block.

use crate::core::network::types::{Endpoint, ProxyCredentials};
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Build the `Basic` authorization value for `user:pass`
///
/// # Examples
/// - `("alice", "secret")` → `Basic YWxpY2U6c2VjcmV0`
pub fn basic_auth_value(credentials: &ProxyCredentials) -> String {
    let token = STANDARD.encode(format!("{}:{}", credentials.user, credentials.pass));
    format!("Basic {}", token)
}

/// Build the full CONNECT request for `target`
///
/// The `Proxy-Authorization` header is emitted only when both user and
/// password are non-empty; partial credentials are sent as an anonymous request.
///
/// # Examples
/// - `CONNECT example.com:443 HTTP/1.0\r\n\r\n`
/// - `CONNECT [::1]:443 HTTP/1.0\r\nProxy-Authorization: Basic dTpw\r\n\r\n`
pub fn build_connect_request(target: &Endpoint, credentials: Option<&ProxyCredentials>) -> String {
    let mut request = format!("CONNECT {} HTTP/1.0\r\n", target);

    if let Some(credentials) = credentials.filter(|c| c.is_complete()) {
        request.push_str(&format!(
            "Proxy-Authorization: {}\r\n",
            basic_auth_value(credentials)
        ));
    }

    request.push_str("\r\n");
    request
}
