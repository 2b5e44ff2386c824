use anyhow::{Context, Result};
use clap::Parser;
use dashboard_server::{Config, Dashboard};
use std::path::PathBuf;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(version, about = "Dashboard bookmark page and application API")]
struct Args {
    /// Path to the config file (defaults to ./dashboard.toml, then /etc/dashboard/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print an example configuration file and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.print_config {
        print!("{}", Config::example()?);
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };
    config.apply_env()?;
    config.validate().context("config is invalid")?;

    // RUST_LOG wins over the configured level
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.server.log_level)),
        )
        .init();

    tracing::info!("Dashboard API starting...");
    match &args.config {
        Some(path) => tracing::info!("Loaded configuration from {}", path.display()),
        None => tracing::info!("Using default configuration lookup"),
    }
    tracing::info!("Storage backend: {:?}", config.database.backend);
    tracing::info!(
        "Dashboard '{}' with {} section(s)",
        config.dashboard.title,
        config.dashboard.sections.len()
    );

    let dashboard = Dashboard::new(config.dashboard.clone())?;
    let db = dashboard_server::build_store(&config.database).await?;
    let service = dashboard_core::ApplicationService::new(db);

    dashboard_server::serve(&config.server, service, dashboard).await
}
