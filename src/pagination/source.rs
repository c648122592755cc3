//! Restartable pagination source

use super::iterator::{Items, SharedItems};
use super::types::{FetchGate, FromJson, Identity, Mapping};
use crate::error::Result;
use crate::fetch::PageFetcher;
use crate::link::LinkPolicy;
use crate::types::{Cursor, JsonObject};
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;

/// Immutable entry point to a paginated collection
///
/// Holds the starting cursor and the mapping. Every call to [`iter`](Self::iter)
/// starts an independent traversal from the first page; a source can be
/// iterated any number of times and cloned freely.
pub struct Pagination<T> {
    start: Cursor,
    mapping: Arc<dyn Mapping<T>>,
    fetcher: Arc<dyn PageFetcher>,
    gate: Option<FetchGate>,
    policy: LinkPolicy,
}

impl<T> Pagination<T> {
    /// Create a source over `start`, mapping items with `mapping`
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        start: Cursor,
        mapping: impl Mapping<T> + 'static,
    ) -> Self {
        Self {
            start,
            mapping: Arc::new(mapping),
            fetcher,
            gate: None,
            policy: LinkPolicy::default(),
        }
    }

    /// Serialize every traversal of this source (and of any source
    /// given the same gate) against each other
    #[must_use]
    pub fn with_gate(mut self, gate: FetchGate) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Set how malformed link metadata is handled
    #[must_use]
    pub fn with_link_policy(mut self, policy: LinkPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Start a new traversal from the first page
    pub fn iter(&self) -> Items<T> {
        Items::new(
            Arc::clone(&self.fetcher),
            Arc::clone(&self.mapping),
            self.gate.clone(),
            self.policy,
            self.start.clone(),
        )
    }

    /// Start a new traversal that several threads can drain together
    pub fn shared_iter(&self) -> SharedItems<T> {
        SharedItems::new(self.iter())
    }

    /// Drain a new traversal into a vector, stopping at the first error
    pub fn collect_all(&self) -> Result<Vec<T>> {
        self.iter().collect()
    }

    /// Starting cursor
    pub fn start(&self) -> &Cursor {
        &self.start
    }

    /// Mapping applied to each item
    pub fn mapping(&self) -> &Arc<dyn Mapping<T>> {
        &self.mapping
    }

    /// Gate shared with other sources, if any
    pub fn gate(&self) -> Option<&FetchGate> {
        self.gate.as_ref()
    }

    /// Link policy handed to each traversal
    pub fn link_policy(&self) -> LinkPolicy {
        self.policy
    }
}

impl Pagination<JsonObject> {
    /// Source yielding raw JSON objects
    pub fn raw(fetcher: Arc<dyn PageFetcher>, start: Cursor) -> Self {
        Self::new(fetcher, start, Identity)
    }
}

impl<T: DeserializeOwned + 'static> Pagination<T> {
    /// Source deserializing each item into `T`
    pub fn deserialize(fetcher: Arc<dyn PageFetcher>, start: Cursor) -> Self {
        Self::new(fetcher, start, FromJson::<T>::new())
    }
}

impl<T> Clone for Pagination<T> {
    fn clone(&self) -> Self {
        Self {
            start: self.start.clone(),
            mapping: Arc::clone(&self.mapping),
            fetcher: Arc::clone(&self.fetcher),
            gate: self.gate.clone(),
            policy: self.policy,
        }
    }
}

impl<'a, T> IntoIterator for &'a Pagination<T> {
    type Item = Result<T>;
    type IntoIter = Items<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> fmt::Display for Pagination<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.start, f)
    }
}

impl<T> fmt::Debug for Pagination<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pagination")
            .field("start", &self.start.as_str())
            .field("policy", &self.policy)
            .field("gated", &self.gate.is_some())
            .finish_non_exhaustive()
    }
}
