//! shapecut - extract cuttable outlines from SVG files
//!
//! Usage:
//!   shapecut extract <svg> [-o out.txt] [-f text|json]   Extract shapes
//!   shapecut inspect <svg>                                Count shape elements
//!
//! Use '-' as the input file to read SVG from stdin.
//! Log level follows RUST_LOG (default: warn, or info with --verbose).

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod cli;

use cli::{ExtractArgs, InspectArgs, cmd_extract, cmd_inspect};

#[derive(Parser)]
#[command(name = "shapecut")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract polygon and path outlines from SVG for nesting and cutting", long_about = None)]
struct Cli {
    /// Log progress (info level) on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract shapes and write them as text or JSON
    Extract(ExtractArgs),

    /// Count polygon and path elements without extracting
    Inspect(InspectArgs),
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Extract(args) => cmd_extract(args),
        Commands::Inspect(args) => cmd_inspect(args),
    }
}
