use clap::Parser;
use hoopoe_domain::CliOverrides;
use hoopoe_jobs::TelemetryReportJob;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "hoopoe")]
#[command(version)]
#[command(about = "Hoopoe - rule-based DNS proxy with regional upstream forwarding")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Listen address
    #[arg(short = 'a', long)]
    address: Option<String>,

    /// Listen port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Forward every matching rewrite instead of only the first
    #[arg(long)]
    scan_all: bool,

    /// Count upstream requests and log them periodically
    #[arg(long)]
    enable_stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        address: cli.address.clone(),
        port: cli.port,
        log_level: cli.log_level.clone(),
        scan_all: cli.scan_all,
        enable_stats: cli.enable_stats,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);
    bootstrap::log_config_summary(&config, cli.config.as_deref());

    info!("Starting Hoopoe DNS proxy v{}", env!("CARGO_PKG_VERSION"));

    let dns_services = di::DnsServices::new(&config)?;
    let shutdown = CancellationToken::new();

    if config.telemetry.enabled {
        let job = TelemetryReportJob::new(Arc::clone(&dns_services.telemetry))
            .with_interval(config.telemetry.report_interval_secs)
            .with_cancellation(shutdown.clone());
        let _report = Arc::new(job).start().await;
    }

    let dns_addr = config.server.listen_addr();
    let mut server = tokio::spawn(server::start_dns_server(
        dns_addr,
        dns_services.handler,
        shutdown.clone(),
    ));

    let finished = tokio::select! {
        result = &mut server => Some(result),
        signal = tokio::signal::ctrl_c() => {
            if let Err(e) = signal {
                error!(error = %e, "Failed to listen for shutdown signal");
            }
            info!("Shutdown signal received");
            None
        }
    };
    shutdown.cancel();

    let result = match finished {
        Some(result) => result,
        None => server.await,
    };
    if let Err(e) = result? {
        error!(error = %e, "DNS server error");
        return Err(e);
    }

    info!("Server shutdown complete");
    Ok(())
}
