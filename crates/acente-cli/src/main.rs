//! CLI for policy document extraction and sales forecasting.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, extract, forecast};

/// Insurance agency CRM tools - extract policy fields and forecast sales
#[derive(Parser)]
#[command(name = "acente")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract fields from a single policy document
    Extract(extract::ExtractArgs),

    /// Extract fields from multiple documents
    Batch(batch::BatchArgs),

    /// Forecast next month's sales from a ledger
    Forecast(forecast::ForecastArgs),

    /// Show target progress for a month
    Target(forecast::TargetArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config_file = config::ConfigFile::resolve(cli.config.as_deref());

    match cli.command {
        Commands::Extract(args) => extract::run(args, &config_file.load()?).await,
        Commands::Batch(args) => batch::run(args, &config_file.load()?).await,
        Commands::Forecast(args) => forecast::run_forecast(args, &config_file.load()?).await,
        Commands::Target(args) => forecast::run_target(args, &config_file.load()?).await,
        Commands::Config(args) => config::run(args, &config_file).await,
    }
}
