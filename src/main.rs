mod commands;
mod firestore;
mod render;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "date-ask")]
#[command(about = "Will you go on a date with me?")]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask the question (default)
    Ask,
    /// Show the stored answer
    Status,
    /// Show where configuration and answers are kept
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command.unwrap_or(Commands::Ask) {
        Commands::Ask => commands::ask::run().await,
        Commands::Status => commands::status::run(),
        Commands::Config => commands::config::run(),
    }
}

/// Logs go to stderr at `warn` unless RUST_LOG or --verbose says otherwise,
/// so they stay out of the way of the prompts.
fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))?;

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    Ok(())
}
