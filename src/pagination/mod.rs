//! Pagination module
//!
//! Lazy, restartable traversal of collections paginated with `Link` headers.
//!
//! # Overview
//!
//! A `Pagination` pairs a starting cursor with a `Mapping`. Each call to
//! `Pagination::iter` returns a fresh `Items` traversal that fetches a page
//! only when its buffer is drained and the previous page declared a `next`
//! link, then maps buffered items one at a time in page and array order.
//!
//! ```rust,ignore
//! use pagewalk::fetch::HttpFetcher;
//! use pagewalk::pagination::Pagination;
//! use std::sync::Arc;
//!
//! let fetcher = Arc::new(HttpFetcher::new()?);
//! let orgs = Pagination::<Org>::deserialize(fetcher, "https://api.github.com/user/orgs".parse()?);
//! for org in &orgs {
//!     println!("{}", org?.login);
//! }
//! ```

mod iterator;
mod source;
mod types;

pub use iterator::{Items, SharedItems};
pub use source::Pagination;
pub use types::{FetchGate, FromJson, Identity, IterState, IterStats, Mapping};
