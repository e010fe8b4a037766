//! Help-Me command line client
//!
//! Finds nearby queue-standing and pet-care providers, pays for a service
//! over PIX, and asks the assistant for reports and advice.

mod commands;
mod config;
mod shutdown;

use clap::{Parser, Subcommand};
use commands::{AdviceArgs, CheckoutArgs, DiscoverArgs, ReportArgs};
use config::{ConfigLoader, Overrides};
use helpme_core::catalog::StaticCatalog;
use helpme_core::discovery::Discovery;
use helpme_core::report::Reporter;
use shutdown::spawn_shutdown_watch;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Help-Me - queue standing and pet care on demand
#[derive(Parser, Debug)]
#[command(name = "helpme")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, global = true, env = "HELPME_CONFIG", default_value = "./helpme-config.toml")]
    config: PathBuf,

    /// Override the reference latitude
    #[arg(long, global = true, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Override the reference longitude
    #[arg(long, global = true, allow_hyphen_values = true)]
    lng: Option<f64>,

    /// Override the search radius in kilometres
    #[arg(short, long, global = true)]
    radius: Option<f64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List providers (or open tasks) around the reference point
    Discover(DiscoverArgs),
    /// Book a service and pay for it with PIX
    Checkout(CheckoutArgs),
    /// Generate a client report from a provider's raw notes
    Report(ReportArgs),
    /// Ask the assistant for advice
    Advice(AdviceArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    init_tracing();

    // Parse command line arguments
    let args = Args::parse();

    tracing::info!("Starting helpme v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let overrides = Overrides {
        latitude: args.lat,
        longitude: args.lng,
        radius_km: args.radius,
    };
    let config = ConfigLoader::new(&args.config, overrides)
        .load()
        .map_err(|e| {
            tracing::error!("Failed to load configuration: {}", e);
            e
        })?;
    tracing::info!("Configuration loaded from {:?}", args.config);

    let catalog = match &config.catalog_path {
        Some(path) => StaticCatalog::load(path).map_err(|e| {
            tracing::error!("Failed to load catalog: {}", e);
            e
        })?,
        None => StaticCatalog::builtin(),
    };
    let discovery = Discovery::new(Arc::new(catalog));

    match args.command {
        Command::Discover(cmd) => commands::discover::run(&discovery, &config.discovery, &cmd),
        Command::Checkout(cmd) => {
            let shutdown_rx = spawn_shutdown_watch();
            commands::checkout::run(&discovery, &config.payment, &cmd, shutdown_rx).await
        }
        Command::Report(cmd) => {
            let reporter = build_reporter(&config);
            commands::report::report(&reporter, &discovery, &cmd).await
        }
        Command::Advice(cmd) => {
            let reporter = build_reporter(&config);
            commands::report::advice(&reporter, &cmd).await
        }
    }
}

fn build_reporter(config: &config::runtime::HelpMeConfig) -> Reporter {
    match &config.assistant {
        Some(assistant) => Reporter::from_config(assistant),
        None => {
            tracing::warn!("No [assistant] section configured, answers will be fallback text");
            Reporter::disabled()
        }
    }
}

/// Initialize the tracing subscriber with environment-based filtering.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,helpme_core=debug,reqwest=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
