//! TileVault CLI - command-line interface.
//!
//! Thin driver over the `tilevault` library: fetch a single tile through
//! the full cache chain, or clear a disk mirror.

mod commands;
mod error;

use clap::{Parser, Subcommand};

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "tilevault", version, about = "Map tile retrieval and caching")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch one tile through the cache chain and write it to a file
    Fetch(commands::fetch::FetchArgs),
    /// Delete a disk mirror tree
    Reset(commands::reset::ResetArgs),
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    // Keep the guard alive so file logging flushes on exit.
    let _logging = match tilevault::logging::init_logging(
        tilevault::logging::DEFAULT_LOG_DIR,
        tilevault::logging::DEFAULT_LOG_FILE,
    ) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("warning: logging disabled: {e}");
            None
        }
    };

    let result = match cli.command {
        Commands::Fetch(args) => commands::fetch::run(args).await,
        Commands::Reset(args) => commands::reset::run(args).await,
    };

    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::ExitCode::FAILURE
        }
    }
}
