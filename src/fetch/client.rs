//! Blocking HTTP page fetcher
//!
//! Issues one GET per page with `reqwest::blocking` and hands back the
//! status, `Link` headers and body untouched. `Link` values are decoded as
//! UTF-8; values that fail are counted rather than dropped.

use super::types::{FetchResponse, PageFetcher};
use crate::error::Result;
use crate::types::Cursor;
use reqwest::blocking::Client;
use reqwest::header::LINK;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Configuration for the HTTP fetcher
#[derive(Debug, Clone)]
pub struct HttpFetcherConfig {
    /// Request timeout
    pub timeout: Duration,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// Bearer token sent as `Authorization`
    pub token: Option<String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpFetcherConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            default_headers: HashMap::new(),
            token: None,
            user_agent: format!("pagewalk/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpFetcherConfig {
    /// Create a new config builder
    pub fn builder() -> HttpFetcherConfigBuilder {
        HttpFetcherConfigBuilder::default()
    }
}

/// Builder for HTTP fetcher config
#[derive(Default)]
pub struct HttpFetcherConfigBuilder {
    config: HttpFetcherConfig,
}

impl HttpFetcherConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set a bearer token
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.config.token = Some(token.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpFetcherConfig {
        self.config
    }
}

/// Page fetcher backed by a blocking reqwest client
///
/// Must not be created or dropped inside an async runtime; reqwest's
/// blocking client owns its own.
pub struct HttpFetcher {
    client: Client,
    config: HttpFetcherConfig,
}

impl HttpFetcher {
    /// Create a fetcher with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpFetcherConfig::default())
    }

    /// Create a fetcher with custom configuration
    pub fn with_config(config: HttpFetcherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the fetcher configuration
    pub fn config(&self) -> &HttpFetcherConfig {
        &self.config
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, cursor: &Cursor) -> Result<FetchResponse> {
        let mut req = self.client.get(cursor.url().clone());

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if let Some(ref token) = self.config.token {
            req = req.bearer_auth(token);
        }

        let response = req.send()?;
        let status = response.status().as_u16();
        let uri = Cursor::new(response.url().clone());
        let mut links = Vec::new();
        let mut unreadable_links = 0;
        for value in response.headers().get_all(LINK) {
            match String::from_utf8(value.as_bytes().to_vec()) {
                Ok(text) => links.push(text),
                Err(_) => unreadable_links += 1,
            }
        }
        let body = response.text()?;

        debug!(
            "GET {} -> {} ({} bytes, {} link header(s))",
            cursor,
            status,
            body.len(),
            links.len()
        );

        Ok(FetchResponse {
            uri,
            status,
            links,
            unreadable_links,
            body,
        })
    }
}

impl std::fmt::Debug for HttpFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpFetcher")
            .field("timeout", &self.config.timeout)
            .field("user_agent", &self.config.user_agent)
            .field("has_token", &self.config.token.is_some())
            .finish_non_exhaustive()
    }
}
