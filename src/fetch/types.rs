//! Fetch types and traits
//!
//! Defines the transport seam and turns a raw response into a `Page`.

use crate::error::{Error, Result};
use crate::link::{malformed_links, next_cursor, LinkPolicy};
use crate::types::{Cursor, JsonObject, JsonValue, Page};

/// Status every page fetch must answer with
pub const STATUS_OK: u16 = 200;

/// Raw result of a single GET
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResponse {
    /// URI that produced the response (after redirects)
    pub uri: Cursor,
    /// HTTP status code
    pub status: u16,
    /// Every `Link` header value that decoded as UTF-8, in order
    pub links: Vec<String>,
    /// `Link` header values that were not valid UTF-8
    pub unreadable_links: usize,
    /// Response body
    pub body: String,
}

impl FetchResponse {
    /// Create a response without link metadata
    pub fn new(uri: Cursor, status: u16, body: impl Into<String>) -> Self {
        Self {
            uri,
            status,
            links: Vec::new(),
            unreadable_links: 0,
            body: body.into(),
        }
    }

    /// Add a `Link` header value
    #[must_use]
    pub fn with_link(mut self, value: impl Into<String>) -> Self {
        self.links.push(value.into());
        self
    }

    /// Record a `Link` header value that could not be decoded
    #[must_use]
    pub fn with_unreadable_link(mut self) -> Self {
        self.unreadable_links += 1;
        self
    }

    /// Check if the status is the expected 200
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }

    /// Decode into a page: check status, find the next link, parse the body
    pub fn into_page(self, policy: LinkPolicy) -> Result<Page> {
        if !self.is_ok() {
            return Err(Error::protocol(self.status, self.uri.as_str(), self.body));
        }

        // One undecodable value makes the whole link set unusable
        let next = if self.unreadable_links > 0 {
            malformed_links(
                &self.uri,
                policy,
                format!(
                    "{} Link header value(s) are not valid UTF-8",
                    self.unreadable_links
                ),
            )?
        } else {
            next_cursor(&self.uri, &self.links, policy)?
        };
        let items = decode_items(&self.uri, &self.body)?;
        Ok(Page::new(items, next))
    }
}

/// Transport seam: one blocking GET per call
///
/// Implementations must not retry on their own behalf; any error they
/// return ends the traversal that asked for the page.
pub trait PageFetcher: Send + Sync {
    /// Fetch the page at `cursor`
    fn fetch(&self, cursor: &Cursor) -> Result<FetchResponse>;
}

/// Parse a page body as a JSON array of objects, keeping array order
pub fn decode_items(uri: &Cursor, body: &str) -> Result<Vec<JsonObject>> {
    let value: JsonValue = serde_json::from_str(body)
        .map_err(|e| Error::parse(uri.as_str(), format!("invalid JSON: {e}")))?;

    let values = match value {
        JsonValue::Array(values) => values,
        other => {
            return Err(Error::parse(
                uri.as_str(),
                format!("expected a JSON array, found {}", describe(&other)),
            ))
        }
    };

    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| match value {
            JsonValue::Object(object) => Ok(object),
            other => Err(Error::parse(
                uri.as_str(),
                format!("item {index} is {}, expected an object", describe(&other)),
            )),
        })
        .collect()
}

fn describe(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
