//! CLI application for Aadhaar card processing.

mod commands;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, process, records, submit};

/// Aadhaar OCR - Extract and store structured data from Aadhaar cards
#[derive(Parser)]
#[command(name = "aadhaar")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract fields from a single card without storing them
    Process(process::ProcessArgs),

    /// Extract, validate and store a single card
    Submit(submit::SubmitArgs),

    /// Process multiple card files
    Batch(batch::BatchArgs),

    /// Inspect and manage stored records
    Records(records::RecordsArgs),

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
        Commands::Process(args) => process::run(args, config_path).await,
        Commands::Submit(args) => submit::run(args, config_path).await,
        Commands::Batch(args) => batch::run(args, config_path).await,
        Commands::Records(args) => records::run(args, config_path).await,
        Commands::Config(args) => config::run(args, config_path).await,
    }
}
