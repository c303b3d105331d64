//! Connectivity Probe Logic
//!
//! Main orchestration for reachability checks:
//! - Direct TCP connect to the target
//! - HTTP/1.0 CONNECT tunnel negotiation through an `http` or `https` proxy
//! - Outcome and diagnostic reporting for the installer

use crate::core::network::debug_logger::EnhancedDebugLogger;
use crate::core::network::proxy_tunnel::{
    config::{ProbeOptions, ProxyProtocol, ProxySettings, UnsupportedProtocol},
    dialer::{Dialer, NetDialer, Transport},
    request::build_connect_request,
    response::{is_tunnel_established, read_status_line, StatusLine},
};
use crate::core::network::types::{Endpoint, ProbeDetail, ProbeOutcome};
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error(transparent)]
    UnsupportedProtocol(#[from] UnsupportedProtocol),
    #[error("Cannot resolve {host}: {source}")]
    Resolve {
        host: String,
        #[source]
        source: io::Error,
    },
    #[error("Connection to {endpoint} failed: {source}")]
    Connect {
        endpoint: String,
        #[source]
        source: io::Error,
    },
    #[error("TLS handshake with {endpoint} failed: {reason}")]
    Tls { endpoint: String, reason: String },
    #[error("HTTPS proxies are not supported by this build (tls feature disabled)")]
    TlsUnavailable,
    #[error("Failed to send CONNECT request: {0}")]
    Request(#[source] io::Error),
    #[error("Unexpected response from proxy: {0}")]
    TunnelRejected(String),
    #[error("Proxy closed the connection before a complete response line: {0:?}")]
    IncompleteResponse(String),
}

/// Coarse classification of probe errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeErrorKind {
    /// Invalid caller input, detected before any connection attempt
    Configuration,
    /// Transport-level failure reaching the target or proxy
    Dial,
    /// Proxy reached, tunnel not established
    Protocol,
}

impl ProbeError {
    pub fn kind(&self) -> ProbeErrorKind {
        match self {
            ProbeError::UnsupportedProtocol(_) => ProbeErrorKind::Configuration,
            ProbeError::Resolve { .. }
            | ProbeError::Connect { .. }
            | ProbeError::Tls { .. }
            | ProbeError::TlsUnavailable => ProbeErrorKind::Dial,
            ProbeError::Request(_)
            | ProbeError::TunnelRejected(_)
            | ProbeError::IncompleteResponse(_) => ProbeErrorKind::Protocol,
        }
    }

    /// DNS resolution failures are the most common installer misconfiguration
    pub fn is_dns_failure(&self) -> bool {
        matches!(self, ProbeError::Resolve { .. })
    }
}

/// Result of a single probe
#[derive(Debug)]
pub struct ProbeReport {
    pub outcome: ProbeOutcome,
    pub detail: ProbeDetail,
    pub error: Option<ProbeError>,
}

impl ProbeReport {
    /// Human-readable one-line summary of the probe
    pub fn diagnostic(&self) -> String {
        let route = match &self.detail.proxy {
            Some(proxy) => format!("{} via {}", self.detail.target, proxy),
            None => self.detail.target.clone(),
        };

        match &self.error {
            None => format!("Connection to {} succeeded!", route),
            Some(err) if err.is_dns_failure() => {
                format!("Error connecting to {}: {} (check DNS configuration)", route, err)
            }
            Some(err) => format!("Error connecting to {}: {}", route, err),
        }
    }

    /// Process exit code: 0 success, 1 configuration error, 2 direct failure, 3 tunnel failure
    pub fn exit_code(&self) -> u8 {
        match &self.error {
            Some(err) if err.kind() == ProbeErrorKind::Configuration => 1,
            _ => self.outcome.exit_code(),
        }
    }
}

/// Stateless connectivity prober
///
/// Every probe opens its own connection and closes it before returning;
/// nothing is shared between calls except the dialer and logger handles.
pub struct Prober<D: Dialer = NetDialer> {
    dialer: D,
    options: ProbeOptions,
    logger: Arc<EnhancedDebugLogger>,
}

impl Prober<NetDialer> {
    pub fn new(options: ProbeOptions, logger: Arc<EnhancedDebugLogger>) -> Self {
        Self::with_dialer(NetDialer::new(), options, logger)
    }
}

impl<D: Dialer> Prober<D> {
    pub fn with_dialer(dialer: D, options: ProbeOptions, logger: Arc<EnhancedDebugLogger>) -> Self {
        Self {
            dialer,
            options,
            logger,
        }
    }

    pub fn dialer(&self) -> &D {
        &self.dialer
    }

    pub fn options(&self) -> &ProbeOptions {
        &self.options
    }

    /// Check that `target` accepts TCP connections
    ///
    /// # Returns
    /// * `Success` - connection established (and immediately closed)
    /// * `DirectConnectFailure` - resolution, refusal or timeout
    pub fn probe_direct(&self, target: &Endpoint) -> ProbeReport {
        let start = Instant::now();
        let correlation_id = self.logger.new_correlation_id();
        self.logger
            .probe_start("direct", &target.to_string(), None, correlation_id.clone());

        let result = self
            .dialer
            .dial(ProxyProtocol::Http, target, &self.options)
            .map(|mut conn| close_quietly(conn.as_mut()));

        let detail = ProbeDetail {
            mode: "direct".to_string(),
            target: target.to_string(),
            proxy: None,
            status_line: None,
            checked_at: chrono::Local::now().to_rfc3339(),
            response_time_ms: start.elapsed().as_millis() as u64,
        };

        let report = match result {
            Ok(()) => ProbeReport {
                outcome: ProbeOutcome::Success,
                detail,
                error: None,
            },
            Err(err) => ProbeReport {
                outcome: ProbeOutcome::DirectConnectFailure,
                detail,
                error: Some(err),
            },
        };

        self.log_report(&report, correlation_id);
        report
    }

    /// Check that `target` can be reached through an HTTP CONNECT tunnel
    ///
    /// # Behavior
    /// 1. Validate the proxy protocol token (`http` / `https`)
    /// 2. Dial the proxy (TLS without verification for `https`)
    /// 3. Send `CONNECT target HTTP/1.0`, with Basic auth when credentials are complete
    /// 4. Read one status line and look for `200 connection established`
    /// 5. Close the connection on every path
    pub fn probe_via_proxy(&self, proxy: &ProxySettings, target: &Endpoint) -> ProbeReport {
        let start = Instant::now();
        let correlation_id = self.logger.new_correlation_id();
        self.logger.probe_start(
            "proxy",
            &target.to_string(),
            Some(&proxy.endpoint.to_string()),
            correlation_id.clone(),
        );

        let mut status_line = None;
        let result = self.establish_tunnel(proxy, target, &mut status_line, &correlation_id);

        let detail = ProbeDetail {
            mode: "proxy".to_string(),
            target: target.to_string(),
            proxy: Some(proxy.endpoint.to_string()),
            status_line,
            checked_at: chrono::Local::now().to_rfc3339(),
            response_time_ms: start.elapsed().as_millis() as u64,
        };

        let report = match result {
            Ok(()) => ProbeReport {
                outcome: ProbeOutcome::Success,
                detail,
                error: None,
            },
            Err(err) => ProbeReport {
                outcome: ProbeOutcome::ProxyTunnelFailure,
                detail,
                error: Some(err),
            },
        };

        self.log_report(&report, correlation_id);
        report
    }

    fn establish_tunnel(
        &self,
        proxy: &ProxySettings,
        target: &Endpoint,
        status_line: &mut Option<String>,
        correlation_id: &str,
    ) -> Result<(), ProbeError> {
        let protocol: ProxyProtocol = proxy.protocol.parse()?;

        self.logger.debug_sync(
            "Prober",
            "proxy_dial",
            &format!("Dialing {} proxy at {}", protocol, proxy.endpoint),
        );
        let mut conn = self.dialer.dial(protocol, &proxy.endpoint, &self.options)?;

        let result = negotiate(
            conn.as_mut(),
            target,
            proxy,
            status_line,
            &self.logger,
            correlation_id,
        );
        close_quietly(conn.as_mut());
        result
    }

    fn log_report(&self, report: &ProbeReport, correlation_id: String) {
        if let Some(err) = &report.error {
            self.logger
                .error_sync("Prober", "probe_failed", &report.diagnostic());
            if err.is_dns_failure() {
                self.logger
                    .debug_sync("Prober", "dns_failure", &err.to_string());
            }
        }
        self.logger.probe_end(
            &report.outcome.to_string(),
            report.detail.response_time_ms,
            correlation_id,
        );
    }
}

/// Write the CONNECT request and interpret the proxy's first line
fn negotiate(
    conn: &mut dyn Transport,
    target: &Endpoint,
    proxy: &ProxySettings,
    status_line: &mut Option<String>,
    logger: &EnhancedDebugLogger,
    correlation_id: &str,
) -> Result<(), ProbeError> {
    let request = build_connect_request(target, proxy.credentials.as_ref());
    logger.connect_request(&request, correlation_id.to_string());

    conn.write_all(request.as_bytes())
        .and_then(|_| conn.flush())
        .map_err(ProbeError::Request)?;

    let line = read_status_line(&mut *conn);
    let trimmed = line.trimmed().to_string();
    if !trimmed.is_empty() {
        *status_line = Some(trimmed.clone());
    }

    match line {
        StatusLine::Complete(text) if is_tunnel_established(&text) => {
            logger.proxy_response(&trimmed, true, correlation_id.to_string());
            Ok(())
        }
        StatusLine::Complete(_) => {
            logger.proxy_response(&trimmed, false, correlation_id.to_string());
            Err(ProbeError::TunnelRejected(trimmed))
        }
        StatusLine::Partial(_) => {
            logger.proxy_response(&trimmed, false, correlation_id.to_string());
            Err(ProbeError::IncompleteResponse(trimmed))
        }
    }
}

// Close errors never change the outcome of a probe
fn close_quietly(conn: &mut dyn Transport) {
    let _ = conn.close();
}
