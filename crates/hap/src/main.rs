//! hap CLI - Help authoring pipeline.
//!
//! Provides commands for:
//! - `export`: Export a project as a standalone HTML document
//! - `preview`: Open a project in the default browser
//! - `pdf`: Write a paginated PDF snapshot of one section

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{ExportArgs, PdfArgs, PreviewArgs};
use output::Output;

/// hap - Help authoring pipeline.
#[derive(Parser)]
#[command(name = "hap", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a project as a standalone HTML document.
    Export(ExportArgs),
    /// Export to a temporary file and open it in the default browser.
    Preview(PreviewArgs),
    /// Write a paginated PDF snapshot of one section.
    Pdf(PdfArgs),
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    let verbose = match &cli.command {
        Commands::Export(args) => args.verbose,
        Commands::Preview(args) => args.verbose,
        Commands::Pdf(args) => args.verbose,
    };

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = match cli.command {
        Commands::Export(args) => args.execute(&output),
        Commands::Preview(args) => args.execute(&output),
        Commands::Pdf(args) => args.execute(&output),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
