//! Fusion Dashboard CLI
//!
//! Command-line entry point for the Fusion alert dashboard.

use std::path::PathBuf;

use clap::Parser;
use fusion_dashboard::{load_config, Config};
use tracing::Level;

#[derive(Parser)]
#[command(name = "fusion-dashboard")]
#[command(about = "Alert statistics dashboard for the Fusion detection service")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Page server port (overrides config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Base URL of the Fusion API (overrides config file)
    #[arg(long)]
    api_url: Option<String>,

    /// Log level
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .init();

    tracing::debug!(
        "Parsed command line arguments: config={:?}, port={:?}, api_url={:?}, log_level={:?}",
        args.config,
        args.port,
        args.api_url,
        args.log_level
    );

    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!("Loading configuration from {:?}", config_path);
        load_config(config_path)?
    } else {
        tracing::debug!("Using default configuration");
        Config::default()
    };

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(api_url) = args.api_url {
        config.api.base_url = api_url;
    }

    tracing::info!("Starting fusion dashboard");
    tracing::debug!(
        "Fusion API: {}, refresh every {} ms, page server port {}",
        config.api.base_url,
        config.refresh.interval_ms,
        config.server.port
    );

    fusion_dashboard::run(config).await?;

    Ok(())
}
