//! pingdom-exporter - Prometheus exporter for Pingdom checks
//!
//! Usage:
//!     pingdom-exporter [--web.listen-address :8000] server <username> <password> <api-key>
//!
//! See --help for more options.

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;

use pingdom_exporter::config::{Cli, Config};
use pingdom_exporter::metrics::{MetricsServer, PingdomExporter};
use pingdom_exporter::pingdom::PingdomClient;
use pingdom_exporter::util::{ShutdownSignal, init_logging};

fn main() -> Result<()> {
    // Missing credentials are reported by clap, before anything is bound.
    let cli = Cli::parse();
    let config = cli.into_config().context("invalid configuration")?;

    init_logging(&config.log_level, config.log_format);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        os = std::env::consts::OS,
        arch = std::env::consts::ARCH,
        "starting pingdom_exporter"
    );

    run(config)
}

/// Run the exporter with the given configuration.
fn run(config: Config) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    runtime.block_on(async { run_async(config).await })
}

/// Async entry point for the exporter.
async fn run_async(config: Config) -> Result<()> {
    let client = PingdomClient::new(
        config.pingdom.base_url.as_str(),
        config.pingdom.credentials.clone(),
        config.pingdom.timeout,
    )
    .context("failed to create pingdom client")?;

    let exporter = PingdomExporter::new(Arc::new(client));

    let server = MetricsServer::bind(config.listen_address, config.metrics_path.clone(), exporter)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_address))?;

    info!(
        address = %config.listen_address,
        metrics_path = %config.metrics_path,
        pingdom_url = %config.pingdom.base_url,
        "listening"
    );

    let shutdown = ShutdownSignal::new();
    let handle = tokio::spawn(server.run(shutdown.subscribe()));

    shutdown.shutdown_on_ctrl_c().await;
    let _ = handle.await;

    info!("pingdom_exporter shut down complete");
    Ok(())
}
