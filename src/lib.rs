//! # pagewalk
//!
//! Lazy, restartable iteration over JSON collection APIs that paginate
//! with `Link` headers (RFC 8288), such as GitHub's REST API.
//!
//! ## Features
//!
//! - **Lazy fetching**: a page is requested only when the previous one is drained
//! - **Restartable sources**: every `iter()` starts an independent traversal
//! - **Typed items**: map raw JSON objects with a closure or serde
//! - **Pure link parsing**: `Link` headers are parsed without any network
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pagewalk::{fetch::HttpFetcher, pagination::Pagination, Result};
//! use std::sync::Arc;
//!
//! #[derive(serde::Deserialize)]
//! struct Repo {
//!     full_name: String,
//! }
//!
//! fn main() -> Result<()> {
//!     let fetcher = Arc::new(HttpFetcher::new()?);
//!     let repos = Pagination::<Repo>::deserialize(
//!         fetcher,
//!         "https://api.github.com/orgs/jcabi/repos".parse()?,
//!     );
//!
//!     let mut items = repos.iter();
//!     while items.has_next()? {
//!         println!("{}", items.next_item()?.full_name);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ Pagination<T>  (start cursor + mapping, immutable)       │
//! │   iter() → Items<T>   iter() → Items<T>   ...            │
//! └──────────────────────────────────────────────────────────┘
//!                │ has_next() / next_item()
//! ┌──────────────┴───────────┬───────────────┬───────────────┐
//! │   PageFetcher            │  Link parser  │   Mapping     │
//! │   GET cursor → response  │  rel="next"   │  JSON → T     │
//! └──────────────────────────┴───────────────┴───────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)] // TODO: Document error variant fields before 1.0

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Link header parsing
pub mod link;

/// Page fetching over HTTP
pub mod fetch;

/// Lazy paginated traversal
pub mod pagination;

/// Configuration file support
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, ErrorKind, Result};
pub use types::*;

// Re-export commonly used types
pub use fetch::{HttpFetcher, PageFetcher};
pub use pagination::{Items, Mapping, Pagination};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
