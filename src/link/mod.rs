//! Web linking module
//!
//! Parses `Link` headers (RFC 8288) and extracts the `next` relation
//! used to walk paginated collections.
//!
//! # Overview
//!
//! Everything here is a pure function over raw header strings, so it can
//! be exercised without any network:
//! - `parse_link_header` - one header value into a list of links
//! - `parse_links` - several header values into a `Links` set
//! - `next_cursor` - the resolved cursor of the `next` relation, if any
//! - `malformed_links` - the policy decision for unusable link metadata

mod parser;
mod types;

pub use parser::{malformed_links, next_cursor, parse_link_header, parse_links};
pub use types::{Link, LinkPolicy, Links, ParseLinkError, NEXT_REL};
