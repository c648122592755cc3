//! Common types used throughout pagewalk
//!
//! This module contains shared type definitions, type aliases,
//! and the value types that flow between the fetch, link and
//! pagination modules.

use crate::error::Result;
use std::fmt;
use std::str::FromStr;
use url::Url;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Cursor
// ============================================================================

/// Location of a fetchable page
///
/// A cursor is never mutated. Moving to the next page means replacing
/// the cursor with the one the server declared.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cursor {
    url: Url,
}

impl Cursor {
    /// Create a cursor from an absolute URL
    pub fn new(url: Url) -> Self {
        Self { url }
    }

    /// Parse a cursor from an absolute URL string
    pub fn parse(input: &str) -> Result<Self> {
        Ok(Self::new(Url::parse(input)?))
    }

    /// Resolve a possibly relative reference against this cursor
    pub fn join(&self, reference: &str) -> std::result::Result<Self, url::ParseError> {
        self.url.join(reference).map(Self::new)
    }

    /// The URL this cursor points at
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The URL as a string slice
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

impl FromStr for Cursor {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Url> for Cursor {
    fn from(url: Url) -> Self {
        Self::new(url)
    }
}

// ============================================================================
// Page
// ============================================================================

/// One fetched page: raw items in array order plus the declared next cursor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Raw items, undecoded
    pub items: Vec<JsonObject>,
    /// Where the following page lives, if the server declared one
    pub next: Option<Cursor>,
}

impl Page {
    /// Create a page
    pub fn new(items: Vec<JsonObject>, next: Option<Cursor>) -> Self {
        Self { items, next }
    }

    /// Check if this is the terminal page
    pub fn is_last(&self) -> bool {
        self.next.is_none()
    }

    /// Number of items on this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the page carries no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_parse_and_display() {
        let cursor = Cursor::parse("https://api.github.com/user/orgs?per_page=2").unwrap();
        assert_eq!(
            cursor.to_string(),
            "https://api.github.com/user/orgs?per_page=2"
        );
        assert_eq!(cursor.url().host_str(), Some("api.github.com"));
    }

    #[test]
    fn test_cursor_rejects_relative() {
        assert!(Cursor::parse("/user/orgs").is_err());
        assert!("not a url".parse::<Cursor>().is_err());
    }

    #[test]
    fn test_cursor_join() {
        let cursor = Cursor::parse("https://api.github.com/user/orgs?page=1").unwrap();

        let relative = cursor.join("/user/orgs?page=2").unwrap();
        assert_eq!(relative.as_str(), "https://api.github.com/user/orgs?page=2");

        let absolute = cursor.join("https://other.example.com/x").unwrap();
        assert_eq!(absolute.as_str(), "https://other.example.com/x");
    }

    #[test]
    fn test_page_is_last() {
        let last = Page::new(vec![JsonObject::new()], None);
        assert!(last.is_last());
        assert_eq!(last.len(), 1);

        let next = Cursor::parse("https://api.example.com/?page=2").unwrap();
        let more = Page::new(Vec::new(), Some(next));
        assert!(!more.is_last());
        assert!(more.is_empty());
    }
}
