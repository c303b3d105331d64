//! Transport Dialing
//!
//! Provides the connection abstraction used by the prober: plain TCP for
//! direct probes and `http` proxies, TLS without certificate verification
//! for `https` proxies.

use crate::core::network::proxy_tunnel::config::{ProbeOptions, ProxyProtocol};
use crate::core::network::proxy_tunnel::prober::ProbeError;
use crate::core::network::types::Endpoint;
use std::io::{self, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream, ToSocketAddrs};

/// An open byte stream to a target or proxy
///
/// Dropping a transport releases it; `close` additionally performs an orderly
/// shutdown (TLS close_notify, TCP FIN) and may be called once before drop.
pub trait Transport: Read + Write + Send {
    fn close(&mut self) -> io::Result<()>;
}

/// Connection factory used by the prober
///
/// This trait is the seam between probe logic and the network: production
/// code uses [`NetDialer`], tests substitute in-memory transports.
pub trait Dialer: Send + Sync {
    /// Open a transport to `endpoint` speaking `protocol`
    ///
    /// # Returns
    /// * `Ok(Box<dyn Transport>)` - Connected (and for `Https`, handshaken) stream
    /// * `Err(ProbeError)` - Resolution, connect or TLS failure
    fn dial(
        &self,
        protocol: ProxyProtocol,
        endpoint: &Endpoint,
        options: &ProbeOptions,
    ) -> Result<Box<dyn Transport>, ProbeError>;
}

impl Transport for TcpStream {
    fn close(&mut self) -> io::Result<()> {
        self.shutdown(Shutdown::Both)
    }
}

/// Production dialer backed by `std::net` and rustls
#[derive(Debug, Default, Clone)]
pub struct NetDialer;

impl NetDialer {
    pub fn new() -> Self {
        Self
    }

    /// Resolve `endpoint`, keeping DNS failures distinct from connect failures
    pub fn resolve(endpoint: &Endpoint) -> Result<Vec<SocketAddr>, ProbeError> {
        let host = endpoint.bare_host();
        let addrs: Vec<SocketAddr> = (host, endpoint.port)
            .to_socket_addrs()
            .map_err(|source| ProbeError::Resolve {
                host: host.to_string(),
                source,
            })?
            .collect();

        if addrs.is_empty() {
            return Err(ProbeError::Resolve {
                host: host.to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "no addresses found"),
            });
        }
        Ok(addrs)
    }

    /// Connect to the first reachable resolved address
    pub fn connect_tcp(endpoint: &Endpoint, options: &ProbeOptions) -> Result<TcpStream, ProbeError> {
        let addrs = Self::resolve(endpoint)?;
        let connect_error = |source: io::Error| ProbeError::Connect {
            endpoint: endpoint.to_string(),
            source,
        };

        let mut last_error = None;
        for addr in &addrs {
            let attempt = match options.connect_timeout {
                Some(timeout) => TcpStream::connect_timeout(addr, timeout),
                None => TcpStream::connect(addr),
            };
            match attempt {
                Ok(stream) => {
                    stream
                        .set_read_timeout(options.io_timeout)
                        .and_then(|_| stream.set_write_timeout(options.io_timeout))
                        .map_err(connect_error)?;
                    return Ok(stream);
                }
                Err(e) => last_error = Some(e),
            }
        }

        Err(connect_error(last_error.unwrap_or_else(|| {
            io::Error::new(io::ErrorKind::NotConnected, "no address could be connected")
        })))
    }
}

impl Dialer for NetDialer {
    fn dial(
        &self,
        protocol: ProxyProtocol,
        endpoint: &Endpoint,
        options: &ProbeOptions,
    ) -> Result<Box<dyn Transport>, ProbeError> {
        match protocol {
            ProxyProtocol::Http => Ok(Box::new(Self::connect_tcp(endpoint, options)?)),
            ProxyProtocol::Https => dial_tls(endpoint, options),
        }
    }
}

#[cfg(feature = "tls")]
fn dial_tls(endpoint: &Endpoint, options: &ProbeOptions) -> Result<Box<dyn Transport>, ProbeError> {
    let tls_error = |reason: String| ProbeError::Tls {
        endpoint: endpoint.to_string(),
        reason,
    };

    let config = insecure_tls::client_config().map_err(|e| tls_error(e.to_string()))?;
    let stream = NetDialer::connect_tcp(endpoint, options)?;
    let tls_stream =
        insecure_tls::handshake(stream, endpoint.bare_host(), config).map_err(tls_error)?;
    Ok(Box::new(tls_stream))
}

#[cfg(not(feature = "tls"))]
fn dial_tls(_endpoint: &Endpoint, _options: &ProbeOptions) -> Result<Box<dyn Transport>, ProbeError> {
    Err(ProbeError::TlsUnavailable)
}

#[cfg(feature = "tls")]
impl Transport for rustls::StreamOwned<rustls::ClientConnection, TcpStream> {
    fn close(&mut self) -> io::Result<()> {
        self.conn.send_close_notify();
        while self.conn.wants_write() {
            self.conn.write_tls(&mut self.sock)?;
        }
        self.sock.shutdown(Shutdown::Both)
    }
}

/// TLS client setup that skips certificate chain and hostname validation
///
/// The probe only needs to know whether a tunnel can be negotiated; trusting
/// the proxy is the job of whatever later uses it. Handshake signatures are
/// still checked so the session itself is well-formed.
#[cfg(feature = "tls")]
mod insecure_tls {
    use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
    use rustls::crypto::{ring, CryptoProvider};
    use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
    use rustls::{ClientConfig, ClientConnection, DigitallySignedStruct, SignatureScheme, StreamOwned};
    use std::net::TcpStream;
    use std::sync::Arc;

    #[derive(Debug)]
    struct AcceptAnyServerCert {
        provider: Arc<CryptoProvider>,
    }

    impl ServerCertVerifier for AcceptAnyServerCert {
        fn verify_server_cert(
            &self,
            _end_entity: &CertificateDer<'_>,
            _intermediates: &[CertificateDer<'_>],
            _server_name: &ServerName<'_>,
            _ocsp_response: &[u8],
            _now: UnixTime,
        ) -> Result<ServerCertVerified, rustls::Error> {
            Ok(ServerCertVerified::assertion())
        }

        fn verify_tls12_signature(
            &self,
            message: &[u8],
            cert: &CertificateDer<'_>,
            dss: &DigitallySignedStruct,
        ) -> Result<HandshakeSignatureValid, rustls::Error> {
            rustls::crypto::verify_tls12_signature(
                message,
                cert,
                dss,
                &self.provider.signature_verification_algorithms,
            )
        }

        fn verify_tls13_signature(
            &self,
            message: &[u8],
            cert: &CertificateDer<'_>,
            dss: &DigitallySignedStruct,
        ) -> Result<HandshakeSignatureValid, rustls::Error> {
            rustls::crypto::verify_tls13_signature(
                message,
                cert,
                dss,
                &self.provider.signature_verification_algorithms,
            )
        }

        fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
            self.provider
                .signature_verification_algorithms
                .supported_schemes()
        }
    }

    pub(super) fn client_config() -> Result<Arc<ClientConfig>, rustls::Error> {
        let provider = Arc::new(ring::default_provider());
        let config = ClientConfig::builder_with_provider(provider.clone())
            .with_safe_default_protocol_versions()?
            .dangerous()
            .with_custom_certificate_verifier(Arc::new(AcceptAnyServerCert { provider }))
            .with_no_client_auth();
        Ok(Arc::new(config))
    }

    /// Run the handshake to completion so TLS failures surface as dial errors
    pub(super) fn handshake(
        mut stream: TcpStream,
        host: &str,
        config: Arc<ClientConfig>,
    ) -> Result<StreamOwned<ClientConnection, TcpStream>, String> {
        let server_name = ServerName::try_from(host)
            .map(|name| name.to_owned())
            .map_err(|e| format!("Invalid server name {}: {}", host, e))?;

        let mut conn = ClientConnection::new(config, server_name)
            .map_err(|e| format!("Failed to create TLS connection: {}", e))?;

        while conn.is_handshaking() {
            let (read, written) = conn.complete_io(&mut stream).map_err(|e| e.to_string())?;
            if read == 0 && written == 0 && conn.is_handshaking() {
                return Err("connection closed during handshake".to_string());
            }
        }

        Ok(StreamOwned::new(conn, stream))
    }
}
