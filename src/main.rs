//! Binary entry point.
//!
//! Exit codes: 0 on graceful shutdown, 1 on any startup failure
//! (configuration, profile load, or exhausted bind attempts).

use clap::Parser;
use std::path::PathBuf;

use folio::config::{self, validate_config, ConfigError, ServerConfig};
use folio::lifecycle::{Shutdown, Startup};
use folio::observability;

#[derive(Parser, Debug)]
#[command(name = "folio", about = "Portfolio site server")]
struct Cli {
    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the first port to try.
    #[arg(long)]
    port: Option<u16>,

    /// Override the bind host.
    #[arg(long)]
    host: Option<String>,

    /// Override the static asset directory.
    #[arg(long)]
    asset_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        // The subscriber may not be installed yet when config loading
        // fails, so the fatal path writes to stderr directly.
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = build_config(&cli)?;

    observability::logging::init(&config.observability);

    tracing::info!(
        host = %config.listener.host,
        port = config.listener.port,
        max_bind_attempts = config.listener.max_bind_attempts,
        asset_dir = %config.static_files.asset_dir,
        "configuration loaded"
    );

    let mut startup = Startup::new(config);
    let server = startup.configure()?;
    let bound = startup.bind()?;

    tracing::info!(
        port = bound.port(),
        attempts = bound.attempts(),
        "serving"
    );

    let shutdown = Shutdown::new();
    server.run(bound.into_listener(), shutdown.subscribe()).await?;

    tracing::info!("shutdown complete");
    Ok(())
}

/// File config (or defaults), then env overrides, then CLI flags.
fn build_config(cli: &Cli) -> Result<ServerConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => config::loader::load_default_config()?,
    };

    if let Some(port) = cli.port {
        config.listener.port = port;
    }
    if let Some(host) = &cli.host {
        config.listener.host = host.clone();
    }
    if let Some(dir) = &cli.asset_dir {
        config.static_files.asset_dir = dir.display().to_string();
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}
