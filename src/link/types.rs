//! Link types
//!
//! Typed representation of parsed `Link` header values.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Relation name that points at the following page
pub const NEXT_REL: &str = "next";

/// A single typed link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    /// Target URI reference, possibly relative
    pub uri: String,
    /// Relation types, lowercased (`rel="next last"` gives two)
    pub rels: Vec<String>,
    /// Every parameter in order of appearance, names lowercased
    pub params: Vec<(String, String)>,
}

impl Link {
    /// Check if this link carries the given relation type
    pub fn has_rel(&self, rel: &str) -> bool {
        self.rels.iter().any(|r| r.eq_ignore_ascii_case(rel))
    }

    /// Value of the first parameter with the given name
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// All links found in a response, in header order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Links(Vec<Link>);

impl Links {
    /// Create a link set
    pub fn new(links: Vec<Link>) -> Self {
        Self(links)
    }

    /// First link carrying the given relation
    pub fn get(&self, rel: &str) -> Option<&Link> {
        self.0.iter().find(|link| link.has_rel(rel))
    }

    /// Shortcut for the `next` relation
    pub fn next(&self) -> Option<&Link> {
        self.get(NEXT_REL)
    }

    /// Number of links
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if no links were found
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over links
    pub fn iter(&self) -> std::slice::Iter<'_, Link> {
        self.0.iter()
    }
}

impl IntoIterator for Links {
    type Item = Link;
    type IntoIter = std::vec::IntoIter<Link>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// What to do with link metadata that cannot be parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkPolicy {
    /// Treat it as "no further pages" and log a warning
    #[default]
    Lenient,
    /// Fail the fetch with a parse error
    Strict,
}

/// A `Link` header value that does not follow the grammar
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed Link header at byte {position}: {message}")]
pub struct ParseLinkError {
    /// Byte offset in the offending header value
    pub position: usize,
    /// What was expected
    pub message: String,
}
