//! Page fetch module
//!
//! The transport seam of the crate: a `PageFetcher` performs one blocking
//! GET per cursor and returns the raw status, `Link` headers and body.
//!
//! # Features
//!
//! - **Blocking HTTP**: `HttpFetcher` over `reqwest::blocking`
//! - **Static auth**: default headers and an optional bearer token
//! - **Page decoding**: `FetchResponse::into_page` checks the status,
//!   resolves the `next` link and parses the JSON array body

mod client;
mod types;

pub use client::{HttpFetcher, HttpFetcherConfig, HttpFetcherConfigBuilder};
pub use types::{decode_items, FetchResponse, PageFetcher, STATUS_OK};
