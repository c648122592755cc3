//! CLI module
//!
//! Command-line interface for walking paginated collections.
//!
//! # Commands
//!
//! - `list` - Stream every item of a collection as JSON lines
//! - `links` - Parse raw `Link` header values and print them

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
