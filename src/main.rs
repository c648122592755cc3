//! pagewalk CLI
//!
//! Command-line interface for walking paginated collections

use clap::Parser;
use pagewalk::cli::{Cli, Runner};

fn main() {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for items
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    let runner = Runner::new(cli);

    if let Err(e) = runner.run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
