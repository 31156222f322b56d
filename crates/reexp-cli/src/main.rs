//! CLI application for mail forwarding labels.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::{batch, config, extract, lookup, store, Context};

/// Mail forwarding labels - Register forwarding orders from OCR text and look up parcels
#[derive(Parser)]
#[command(name = "reexp")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the record store (overrides the config file)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a forwarding record from label OCR text
    Extract(extract::ExtractArgs),

    /// Extract records from multiple OCR text files
    Batch(batch::BatchArgs),

    /// Find the forwarding order for a name on a parcel
    Lookup(lookup::LookupArgs),

    /// List the name candidates found in a text
    Candidates(lookup::CandidatesArgs),

    /// Manage stored forwarding records
    Store(store::StoreArgs),

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

    let ctx = || Context::load(cli.config.as_deref(), cli.store.clone());

    // Execute command
    match cli.command {
        Commands::Extract(args) => extract::run(args, &ctx()?).await,
        Commands::Batch(args) => batch::run(args, &ctx()?).await,
        Commands::Lookup(args) => lookup::run(args, &ctx()?).await,
        Commands::Candidates(args) => lookup::candidates(args).await,
        Commands::Store(args) => store::run(args, &ctx()?).await,
        Commands::Config(args) => config::run(args, cli.config.as_deref()).await,
    }
}
