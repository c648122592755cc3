//! Error types for pagewalk
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for pagewalk
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Fetch Errors (fatal for a traversal)
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {status} from {uri}: {body}")]
    Protocol {
        status: u16,
        uri: String,
        body: String,
    },

    #[error("Failed to parse page from {uri}: {message}")]
    Parse { uri: String, message: String },

    #[error("Pagination aborted at {uri} after an earlier {cause:?} failure")]
    Aborted { uri: String, cause: ErrorKind },

    // ============================================================================
    // Consumer Errors
    // ============================================================================
    #[error("No more elements in pagination, use has_next()")]
    Exhausted,

    #[error("Mapping failed: {message}")]
    Mapping { message: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

/// Coarse classification of an [`Error`]
///
/// Lets a consumer tell a finished sequence apart from a failed one
/// without matching on every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network or I/O failure while fetching
    Transport,
    /// The server answered with a non-success status
    Protocol,
    /// A page body or its link metadata could not be parsed
    Parse,
    /// The caller consumed past the end of the sequence
    Exhaustion,
    /// A mapping rejected an item
    Mapping,
    /// Invalid configuration or input
    Config,
    /// Anything else
    Other,
}

impl Error {
    /// Create a protocol (bad status) error
    pub fn protocol(status: u16, uri: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Protocol {
            status,
            uri: uri.into(),
            body: body.into(),
        }
    }

    /// Create a page parse error
    pub fn parse(uri: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            uri: uri.into(),
            message: message.into(),
        }
    }

    /// Create an aborted-traversal error, keeping the kind of the failure
    /// that ended the traversal
    pub fn aborted(uri: impl Into<String>, cause: ErrorKind) -> Self {
        Self::Aborted {
            uri: uri.into(),
            cause,
        }
    }

    /// Create a mapping error
    pub fn mapping(message: impl Into<String>) -> Self {
        Self::Mapping {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Transport(_) | Error::Io(_) => ErrorKind::Transport,
            Error::Aborted { cause, .. } => *cause,
            Error::Protocol { .. } => ErrorKind::Protocol,
            Error::Parse { .. } | Error::JsonParse(_) => ErrorKind::Parse,
            Error::Exhausted => ErrorKind::Exhaustion,
            Error::Mapping { .. } => ErrorKind::Mapping,
            Error::Config { .. }
            | Error::InvalidUrl(_)
            | Error::YamlParse(_)
            | Error::FileNotFound { .. } => ErrorKind::Config,
            Error::Other(_) => ErrorKind::Other,
        }
    }

    /// Check if this error ends a traversal for good
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::Transport(_)
                | Error::Protocol { .. }
                | Error::Parse { .. }
                | Error::Aborted { .. }
        )
    }
}

/// Result type alias for pagewalk
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
