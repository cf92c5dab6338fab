//! Command line entry point
//!
//! ```text
//! datavis import <file> <name> [--kind csv|json|sqlite] [--no-header]
//!                [--columns a,b,c] [--config import.json]
//! datavis identify <result.json> [--category col] [--value col] [--line-x col]
//! ```

use anyhow::Result;
use clap::Parser as _;
use tracing_subscriber::EnvFilter;

mod cli;
mod dry_run;
mod identify;
mod import;

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(cli::run_command(cli.command))
}
