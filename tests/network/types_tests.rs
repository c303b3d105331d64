/*!
Tests for the shared probe types.
*/

use nettool::core::network::types::{Endpoint, ProbeDetail, ProbeOutcome, ProxyCredentials};

#[test]
fn test_endpoint_display() {
    assert_eq!(Endpoint::new("du.example.com", 443).to_string(), "du.example.com:443");
    assert_eq!(Endpoint::new("10.1.2.3", 80).to_string(), "10.1.2.3:80");
    assert_eq!(Endpoint::new("::1", 3128).to_string(), "[::1]:3128");
    assert_eq!(Endpoint::new("[fe80::1]", 3128).to_string(), "[fe80::1]:3128");
}

#[test]
fn test_endpoint_bare_host() {
    assert_eq!(Endpoint::new("[::1]", 1).bare_host(), "::1");
    assert_eq!(Endpoint::new("::1", 1).bare_host(), "::1");
    assert_eq!(Endpoint::new("proxy", 1).bare_host(), "proxy");
}

#[test]
fn test_credentials_from_parts() {
    assert_eq!(ProxyCredentials::from_parts(None, None), None);
    assert_eq!(ProxyCredentials::from_parts(Some(""), Some("")), None);

    let user_only = ProxyCredentials::from_parts(Some("alice"), None).unwrap();
    assert_eq!(user_only.user, "alice");
    assert!(!user_only.is_complete());

    let full = ProxyCredentials::from_parts(Some("alice"), Some("secret")).unwrap();
    assert!(full.is_complete());
}

#[test]
fn test_credentials_debug_hides_password() {
    let creds = ProxyCredentials::new("alice", "secret");
    let debug = format!("{:?}", creds);

    assert!(debug.contains("alice"));
    assert!(!debug.contains("secret"));
    assert!(debug.contains("[REDACTED]"));
}

#[test]
fn test_outcome_exit_codes() {
    assert_eq!(ProbeOutcome::Success.exit_code(), 0);
    assert_eq!(ProbeOutcome::DirectConnectFailure.exit_code(), 2);
    assert_eq!(ProbeOutcome::ProxyTunnelFailure.exit_code(), 3);

    assert!(ProbeOutcome::Success.is_success());
    assert!(!ProbeOutcome::ProxyTunnelFailure.is_success());
    assert_eq!(ProbeOutcome::ProxyTunnelFailure.to_string(), "proxy_tunnel_failure");
}

#[test]
fn test_probe_detail_serialization() {
    let detail = ProbeDetail {
        mode: "proxy".to_string(),
        target: "du.example.com:443".to_string(),
        proxy: Some("proxy.corp.com:3128".to_string()),
        status_line: Some("HTTP/1.0 200 Connection established".to_string()),
        checked_at: "2024-01-01T00:00:00+00:00".to_string(),
        response_time_ms: 12,
    };

    let json = serde_json::to_value(&detail).unwrap();
    assert_eq!(json["mode"], "proxy");
    assert_eq!(json["proxy"], "proxy.corp.com:3128");
    assert_eq!(json["response_time_ms"], 12);
}
