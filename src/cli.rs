use crate::config::ConnectConfig;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "nettool")]
#[command(version = concat!("Ver:", env!("CARGO_PKG_VERSION")))]
#[command(about = "Installer utility: checks network connectivity and parses proxy urls")]
pub struct Cli {
    /// Config file (default is $HOME/.nettool.toml)
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging (also mirrored to stderr)
    #[arg(short = 'd', long = "debug", global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Checks connectivity to a host, directly or through a proxy
    Connect(ConnectArgs),

    /// Parse a proxy url
    #[command(
        long_about = "Parse a proxy url.\n\nThe proxy url should have the format:\n[<protocol>://][<username>:<password>@]<proxy_host>[:<proxy_port>]\n\nPrints: <protocol> <host> <port> [<username> <password>]"
    )]
    Urlparse {
        /// Proxy url to parse
        url: String,
    },
}

/// `connect` flags; unset flags fall back to environment, config file, then defaults
#[derive(Args, Debug, Default)]
pub struct ConnectArgs {
    /// Host to connect to [default: localhost]
    #[arg(short = 'o', long = "host", visible_alias = "du-fqdn")]
    pub host: Option<String>,

    /// Port to connect to [default: 80]
    #[arg(short = 'p', long = "port", value_parser = clap::value_parser!(u16).range(1..))]
    pub port: Option<u16>,

    /// Proxy protocol: http or https [default: http]
    #[arg(short = 'c', long = "proxy-protocol")]
    pub proxy_protocol: Option<String>,

    /// Proxy host; connects directly when omitted
    #[arg(short = 'r', long = "proxy-host")]
    pub proxy_host: Option<String>,

    /// Proxy port [default: 3128]
    #[arg(short = 't', long = "proxy-port", value_parser = clap::value_parser!(u16).range(1..))]
    pub proxy_port: Option<u16>,

    /// Proxy user
    #[arg(short = 'u', long = "proxy-user")]
    pub proxy_user: Option<String>,

    /// Proxy password
    #[arg(short = 'w', long = "proxy-pass")]
    pub proxy_pass: Option<String>,

    /// Connect and I/O timeout in milliseconds (OS defaults when omitted)
    #[arg(long = "timeout-ms")]
    pub timeout_ms: Option<u64>,
}

impl ConnectArgs {
    /// Overlay explicitly given flags on top of the loaded configuration
    pub fn apply_to(&self, config: &mut ConnectConfig) {
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(protocol) = &self.proxy_protocol {
            config.proxy_protocol = protocol.clone();
        }
        if let Some(proxy_host) = &self.proxy_host {
            config.proxy_host = Some(proxy_host.clone());
        }
        if let Some(proxy_port) = self.proxy_port {
            config.proxy_port = proxy_port;
        }
        if let Some(user) = &self.proxy_user {
            config.proxy_user = Some(user.clone());
        }
        if let Some(pass) = &self.proxy_pass {
            config.proxy_pass = Some(pass.clone());
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.timeout_ms = Some(timeout_ms);
        }
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
