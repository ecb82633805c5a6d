//! Guide CLI - LangChain4j tutorial site.
//!
//! Provides commands for:
//! - `serve`: Start the guide server
//! - `check`: Render every page and report diagram failures

mod commands;
mod error;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, ServeArgs};
use output::Output;

/// Application version from Cargo.toml.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Guide - LangChain4j tutorial site.
#[derive(Parser)]
#[command(name = "guide", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the guide server.
    Serve(ServeArgs),
    /// Render every page and report diagrams that fell back to source.
    Check(CheckArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Serve(args) => args.verbose,
        Commands::Check(args) => args.verbose,
    };

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Serve(args) => tokio::runtime::Runtime::new()
            .map_err(error::CliError::from)
            .and_then(|rt| rt.block_on(args.execute(VERSION))),
        Commands::Check(args) => args.execute(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output.error(&format!("Error: {err}"));
            ExitCode::FAILURE
        }
    }
}
