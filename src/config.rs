//! Configuration file support
//!
//! A small YAML document configures the HTTP fetcher and link handling:
//!
//! ```yaml
//! http:
//!   timeout_seconds: 30
//!   user_agent: "pagewalk/0.1"
//!   headers:
//!     Accept: "application/vnd.github+json"
//!   token_env: GITHUB_TOKEN
//! links:
//!   policy: strict
//! ```

use crate::error::{Error, Result};
use crate::fetch::{HttpFetcher, HttpFetcherConfig};
use crate::link::LinkPolicy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete configuration loaded from YAML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PagewalkConfig {
    /// HTTP fetcher configuration
    #[serde(default)]
    pub http: HttpConfig,

    /// Link header handling
    #[serde(default)]
    pub links: LinkConfig,
}

impl PagewalkConfig {
    /// Parse a config from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a config from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Build the HTTP fetcher this config describes
    pub fn fetcher(&self) -> Result<HttpFetcher> {
        HttpFetcher::with_config(self.http.to_fetcher_config()?)
    }
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP fetcher configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Bearer token, used as is
    #[serde(default)]
    pub token: Option<String>,

    /// Environment variable holding the bearer token
    #[serde(default)]
    pub token_env: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            user_agent: None,
            headers: HashMap::new(),
            token: None,
            token_env: None,
        }
    }
}

fn default_timeout() -> u64 {
    30
}

impl HttpConfig {
    /// Token from `token`, else from the `token_env` variable
    ///
    /// A named but unset variable is a config error.
    pub fn resolve_token(&self) -> Result<Option<String>> {
        if let Some(ref token) = self.token {
            return Ok(Some(token.clone()));
        }
        match self.token_env {
            Some(ref var) => std::env::var(var)
                .map(Some)
                .map_err(|_| Error::config(format!("environment variable '{var}' is not set"))),
            None => Ok(None),
        }
    }

    /// Convert to the fetcher's runtime config
    pub fn to_fetcher_config(&self) -> Result<HttpFetcherConfig> {
        if self.timeout_seconds == 0 {
            return Err(Error::config("timeout_seconds must be greater than 0"));
        }

        let mut builder = HttpFetcherConfig::builder()
            .timeout(Duration::from_secs(self.timeout_seconds));
        if let Some(ref agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }
        for (key, value) in &self.headers {
            builder = builder.header(key, value);
        }
        if let Some(token) = self.resolve_token()? {
            builder = builder.token(token);
        }
        Ok(builder.build())
    }
}

// ============================================================================
// Link Config
// ============================================================================

/// Link header handling
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinkConfig {
    /// What to do with malformed link metadata
    #[serde(default)]
    pub policy: LinkPolicy,
}
