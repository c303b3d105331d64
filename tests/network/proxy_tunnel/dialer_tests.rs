/*!
Tests for `NetDialer` against loopback sockets.
*/

use crate::common::closed_port;
use nettool::core::network::proxy_tunnel::{
    Dialer, NetDialer, ProbeError, ProbeOptions, ProxyProtocol,
};
use nettool::core::network::types::Endpoint;
use std::io::Read;
use std::net::TcpListener;
use std::time::Duration;

#[test]
fn test_resolve_ip_literals() {
    let v4 = NetDialer::resolve(&Endpoint::new("127.0.0.1", 80)).unwrap();
    assert_eq!(v4[0].port(), 80);
    assert!(v4[0].is_ipv4());

    // Brackets are stripped before resolution
    let v6 = NetDialer::resolve(&Endpoint::new("[::1]", 3128)).unwrap();
    assert!(v6[0].is_ipv6());
    assert_eq!(v6[0].port(), 3128);
}

#[test]
fn test_resolve_failure_is_dns_error() {
    let err = NetDialer::resolve(&Endpoint::new("nettool-test-host.invalid", 80)).unwrap_err();
    assert!(err.is_dns_failure());
    assert!(err.to_string().contains("nettool-test-host.invalid"));
}

/// The kernel stores socket timeouts in scheduler ticks, so read-back values are rounded
fn assert_close_to(actual: Option<Duration>, expected: Duration) {
    let actual = actual.expect("timeout should be set");
    let diff = if actual > expected {
        actual - expected
    } else {
        expected - actual
    };
    assert!(
        diff <= Duration::from_millis(20),
        "expected about {:?}, got {:?}",
        expected,
        actual
    );
}

#[test]
fn test_connect_tcp_applies_io_timeout() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    let timeout = Duration::from_millis(750);
    let options = ProbeOptions::with_timeout(timeout);

    let stream = NetDialer::connect_tcp(&Endpoint::new("127.0.0.1", port), &options).unwrap();

    assert_close_to(stream.read_timeout().unwrap(), timeout);
    assert_close_to(stream.write_timeout().unwrap(), timeout);
}

#[test]
fn test_connect_tcp_without_timeout_leaves_blocking_io() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let stream =
        NetDialer::connect_tcp(&Endpoint::new("127.0.0.1", port), &ProbeOptions::default()).unwrap();

    assert_eq!(stream.read_timeout().unwrap(), None);
}

#[test]
fn test_connect_tcp_refused() {
    let endpoint = Endpoint::new("127.0.0.1", closed_port());
    let err = NetDialer::connect_tcp(&endpoint, &ProbeOptions::default()).unwrap_err();

    match err {
        ProbeError::Connect { endpoint: reported, .. } => {
            assert_eq!(reported, endpoint.to_string());
        }
        other => panic!("expected connect error, got {:?}", other),
    }
}

#[test]
fn test_dial_http_and_close() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let mut transport = NetDialer::new()
        .dial(
            ProxyProtocol::Http,
            &Endpoint::new("127.0.0.1", port),
            &ProbeOptions::with_timeout(Duration::from_secs(5)),
        )
        .unwrap();
    transport.close().unwrap();

    // The peer observes an orderly shutdown
    let (mut accepted, _) = listener.accept().unwrap();
    accepted
        .set_read_timeout(Some(Duration::from_secs(5)))
        .unwrap();
    let mut buf = [0u8; 8];
    assert_eq!(accepted.read(&mut buf).unwrap(), 0);
}

#[cfg(not(feature = "tls"))]
#[test]
fn test_https_without_tls_feature() {
    let err = NetDialer::new()
        .dial(
            ProxyProtocol::Https,
            &Endpoint::new("127.0.0.1", 443),
            &ProbeOptions::default(),
        )
        .err()
        .unwrap();
    assert!(matches!(err, ProbeError::TlsUnavailable));
}
