//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Walk Link-header paginated JSON APIs
#[derive(Parser, Debug)]
#[command(name = "pagewalk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch every page of a collection and print one item per line
    List {
        /// URL of the first page
        url: String,

        /// Stop after this many items
        #[arg(long)]
        max_items: Option<usize>,

        /// JSON pointer selecting a field of each item (e.g. /login)
        #[arg(long)]
        pointer: Option<String>,

        /// Pretty-print each item
        #[arg(long)]
        pretty: bool,

        /// Fail on malformed Link headers instead of stopping
        #[arg(long)]
        strict: bool,
    },

    /// Parse raw Link header values
    Links {
        /// Header values, one per argument
        #[arg(required = true)]
        headers: Vec<String>,

        /// Resolve the next link against this URL
        #[arg(long)]
        base: Option<String>,
    },
}
