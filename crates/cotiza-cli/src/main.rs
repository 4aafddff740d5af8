//! CLI application for turning vendor quotations into purchase orders.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, companies, config, extract, order};

/// Cotiza - Extract quotation data and build purchase orders
#[derive(Parser)]
#[command(name = "cotiza")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract data from a single quotation
    Extract(extract::ExtractArgs),

    /// Build a purchase order from a quotation
    Order(order::OrderArgs),

    /// Extract data from multiple quotations
    Batch(batch::BatchArgs),

    /// List configured purchasing companies
    Companies,

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

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Extract(args) => extract::run(args, config_path).await,
        Commands::Order(args) => order::run(args, config_path).await,
        Commands::Batch(args) => batch::run(args, config_path).await,
        Commands::Companies => companies::run(config_path).await,
        Commands::Config(args) => config::run(args, config_path).await,
    }
}
