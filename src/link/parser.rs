//! Link header parser
//!
//! Handles the RFC 8288 grammar:
//! `Link: <https://api.github.com/...?page=2>; rel="next", <...>; rel="last"`
//!
//! Commas and semicolons inside `<...>` and inside quoted strings do not
//! split links or parameters.

use super::types::{Link, LinkPolicy, Links, ParseLinkError, NEXT_REL};
use crate::error::{Error, Result};
use crate::types::Cursor;
use tracing::warn;

/// Parse one `Link` header value into its links
pub fn parse_link_header(value: &str) -> std::result::Result<Vec<Link>, ParseLinkError> {
    let mut scanner = Scanner::new(value);
    let mut links = Vec::new();

    loop {
        scanner.skip_whitespace();
        match scanner.peek() {
            None => break,
            Some(',') => scanner.bump(),
            Some('<') => links.push(parse_link_value(&mut scanner)?),
            Some(c) => return Err(scanner.error(format!("expected '<', found '{c}'"))),
        }
    }

    Ok(links)
}

/// Parse every `Link` header value of a response into one link set
pub fn parse_links<I, S>(values: I) -> std::result::Result<Links, ParseLinkError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut links = Vec::new();
    for value in values {
        links.extend(parse_link_header(value.as_ref())?);
    }
    Ok(Links::new(links))
}

/// Find the `next` relation and resolve it against the cursor that was fetched
///
/// A missing relation is `Ok(None)`. Malformed metadata is handled per `policy`.
pub fn next_cursor<S: AsRef<str>>(
    base: &Cursor,
    values: &[S],
    policy: LinkPolicy,
) -> Result<Option<Cursor>> {
    let links = match parse_links(values) {
        Ok(links) => links,
        Err(e) => return malformed_links(base, policy, e.to_string()),
    };

    let Some(link) = links.get(NEXT_REL) else {
        return Ok(None);
    };

    match base.join(&link.uri) {
        Ok(next) => Ok(Some(next)),
        Err(e) => malformed_links(
            base,
            policy,
            format!("invalid next link '{}': {e}", link.uri),
        ),
    }
}

/// Apply `policy` to link metadata that cannot be used
///
/// `Lenient` logs and reports no next page; `Strict` fails with a parse error.
pub fn malformed_links(
    base: &Cursor,
    policy: LinkPolicy,
    message: String,
) -> Result<Option<Cursor>> {
    match policy {
        LinkPolicy::Lenient => {
            warn!("Ignoring link metadata from {}: {}", base, message);
            Ok(None)
        }
        LinkPolicy::Strict => Err(Error::parse(base.as_str(), message)),
    }
}

fn parse_link_value(scanner: &mut Scanner<'_>) -> std::result::Result<Link, ParseLinkError> {
    scanner.expect('<')?;
    let uri = scanner.take_until('>')?.trim().to_string();
    scanner.expect('>')?;

    let mut params = Vec::new();
    loop {
        scanner.skip_whitespace();
        match scanner.peek() {
            None | Some(',') => break,
            Some(';') => {
                scanner.bump();
                scanner.skip_whitespace();
                // Tolerate empty parameters such as "<a>;; rel=next"
                if matches!(scanner.peek(), None | Some(',' | ';')) {
                    continue;
                }
                params.push(parse_param(scanner)?);
            }
            Some(c) => return Err(scanner.error(format!("expected ';' or ',', found '{c}'"))),
        }
    }

    let rels = params
        .iter()
        .find(|(name, _)| name == "rel")
        .map(|(_, value)| {
            value
                .split_ascii_whitespace()
                .map(str::to_ascii_lowercase)
                .collect()
        })
        .unwrap_or_default();

    Ok(Link { uri, rels, params })
}

fn parse_param(
    scanner: &mut Scanner<'_>,
) -> std::result::Result<(String, String), ParseLinkError> {
    let name = scanner.token()?.to_ascii_lowercase();
    scanner.skip_whitespace();

    if scanner.peek() != Some('=') {
        return Ok((name, String::new()));
    }
    scanner.bump();
    scanner.skip_whitespace();

    let value = if scanner.peek() == Some('"') {
        scanner.quoted()?
    } else {
        scanner.token()?.to_string()
    };
    Ok((name, value))
}

// ============================================================================
// Scanner
// ============================================================================

struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t')) {
            self.bump();
        }
    }

    fn expect(&mut self, expected: char) -> std::result::Result<(), ParseLinkError> {
        match self.peek() {
            Some(c) if c == expected => {
                self.bump();
                Ok(())
            }
            Some(c) => Err(self.error(format!("expected '{expected}', found '{c}'"))),
            None => Err(self.error(format!("expected '{expected}', found end of input"))),
        }
    }

    fn take_until(&mut self, end: char) -> std::result::Result<&'a str, ParseLinkError> {
        let rest = self.rest();
        match rest.find(end) {
            Some(len) => {
                self.pos += len;
                Ok(&rest[..len])
            }
            None => Err(self.error(format!("unterminated, missing '{end}'"))),
        }
    }

    fn token(&mut self) -> std::result::Result<&'a str, ParseLinkError> {
        let rest = self.rest();
        let len = rest
            .find(|c: char| !is_tchar(c))
            .unwrap_or(rest.len());
        if len == 0 {
            return Err(self.error("expected a token"));
        }
        self.pos += len;
        Ok(&rest[..len])
    }

    fn quoted(&mut self) -> std::result::Result<String, ParseLinkError> {
        self.expect('"')?;
        let mut value = String::new();
        loop {
            match self.peek() {
                None => return Err(self.error("unterminated quoted string")),
                Some('"') => {
                    self.bump();
                    return Ok(value);
                }
                Some('\\') => {
                    self.bump();
                    match self.peek() {
                        Some(c) => {
                            value.push(c);
                            self.bump();
                        }
                        None => return Err(self.error("dangling escape in quoted string")),
                    }
                }
                Some(c) => {
                    value.push(c);
                    self.bump();
                }
            }
        }
    }

    fn error(&self, message: impl Into<String>) -> ParseLinkError {
        ParseLinkError {
            position: self.pos,
            message: message.into(),
        }
    }
}

fn is_tchar(c: char) -> bool {
    c.is_ascii_alphanumeric() || "!#$%&'*+-.^_`|~".contains(c)
}
