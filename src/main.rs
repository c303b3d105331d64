use nettool::cli::{Cli, Commands};
use nettool::config::{ConnectConfig, NettoolConfig};
use nettool::core::network::proxy_tunnel::Prober;
use nettool::core::network::proxy_url::parse_proxy_url;
use nettool::core::network::EnhancedDebugLogger;
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match main_impl(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}

fn main_impl(cli: Cli) -> Result<u8, Box<dyn std::error::Error>> {
    let (mut config, config_path) = NettoolConfig::load(cli.config.as_deref())?;
    if cli.debug {
        config.logging.debug = true;
        config.logging.echo_stderr = true;
    }

    let logger = Arc::new(EnhancedDebugLogger::new(&config.logging));
    if let Some(path) = config_path {
        logger.debug_sync(
            "Config",
            "config_loaded",
            &format!("Using config file: {}", path.display()),
        );
    }

    match cli.command {
        Commands::Connect(args) => {
            args.apply_to(&mut config.connect);
            Ok(run_connect(&config.connect, logger))
        }
        Commands::Urlparse { url } => {
            let parsed = parse_proxy_url(&url)?;
            logger.url_parsed(
                parsed.protocol().as_str(),
                parsed.host(),
                parsed.port(),
                parsed.credentials().is_some_and(|c| c.is_complete()),
            );
            println!("{}", parsed);
            Ok(0)
        }
    }
}

fn run_connect(config: &ConnectConfig, logger: Arc<EnhancedDebugLogger>) -> u8 {
    let prober = Prober::new(config.probe_options(), logger);
    let target = config.target();

    let report = match config.proxy() {
        Some(proxy) => prober.probe_via_proxy(&proxy, &target),
        None => prober.probe_direct(&target),
    };

    if report.outcome.is_success() {
        println!("{}", report.diagnostic());
    } else {
        eprintln!("{}", report.diagnostic());
    }
    report.exit_code()
}
