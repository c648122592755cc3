//! Paginated traversal
//!
//! `Items` fetches pages on demand and maps buffered items one at a time.
//! It moves through three states: nothing buffered with more pages
//! expected, items buffered, and nothing buffered with the last page
//! already fetched. A fatal fetch error parks it in a fourth, failed state.

use super::types::{FetchGate, IterState, IterStats, Mapping};
use crate::error::{Error, ErrorKind, Result};
use crate::fetch::PageFetcher;
use crate::link::LinkPolicy;
use crate::types::{Cursor, JsonObject, Page};
use std::fmt;
use std::iter::FusedIterator;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

// ============================================================================
// Page Buffer
// ============================================================================

/// Immutable snapshot of one page with a read position
#[derive(Debug, Default)]
struct PageBuffer {
    items: Vec<JsonObject>,
    position: usize,
}

impl PageBuffer {
    fn new(items: Vec<JsonObject>) -> Self {
        Self { items, position: 0 }
    }

    fn remaining(&self) -> usize {
        self.items.len() - self.position
    }

    fn is_drained(&self) -> bool {
        self.position >= self.items.len()
    }

    fn advance(&mut self) -> Option<&JsonObject> {
        let item = self.items.get(self.position)?;
        self.position += 1;
        Some(item)
    }
}

// ============================================================================
// Items
// ============================================================================

/// One traversal over a paginated collection
///
/// Created by [`Pagination::iter`](super::Pagination::iter). Single use:
/// once exhausted or failed it never produces another item, and a new
/// traversal starts from the beginning only through the source.
pub struct Items<T> {
    fetcher: Arc<dyn PageFetcher>,
    mapping: Arc<dyn Mapping<T>>,
    gate: Option<FetchGate>,
    policy: LinkPolicy,
    cursor: Cursor,
    buffer: PageBuffer,
    has_more: bool,
    failure: Option<ErrorKind>,
    stats: IterStats,
}

impl<T> Items<T> {
    pub(crate) fn new(
        fetcher: Arc<dyn PageFetcher>,
        mapping: Arc<dyn Mapping<T>>,
        gate: Option<FetchGate>,
        policy: LinkPolicy,
        start: Cursor,
    ) -> Self {
        Self {
            fetcher,
            mapping,
            gate,
            policy,
            cursor: start,
            buffer: PageBuffer::default(),
            has_more: true,
            failure: None,
            stats: IterStats::default(),
        }
    }

    /// Check whether another item is available
    ///
    /// Fetches when nothing is buffered and more pages are expected.
    /// Calling it again without consuming an item does not fetch again.
    pub fn has_next(&mut self) -> Result<bool> {
        let gate = self.gate.clone();
        let _guard = gate.as_ref().map(FetchGate::enter);
        self.ensure_buffered()
    }

    /// Consume the next item and map it
    ///
    /// Fails with [`Error::Exhausted`] when `has_next` would return false.
    pub fn next_item(&mut self) -> Result<T> {
        let gate = self.gate.clone();
        let _guard = gate.as_ref().map(FetchGate::enter);

        if !self.ensure_buffered()? {
            return Err(Error::Exhausted);
        }
        let Some(object) = self.buffer.advance() else {
            return Err(Error::Exhausted);
        };
        self.stats.items_mapped += 1;
        self.mapping.map(object)
    }

    /// Cursor of the next page to fetch, or of the last one fetched
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Items fetched but not yet consumed
    pub fn buffered(&self) -> usize {
        self.buffer.remaining()
    }

    /// Current state of the traversal
    pub fn state(&self) -> IterState {
        if self.failure.is_some() {
            IterState::Failed
        } else if !self.buffer.is_drained() {
            IterState::Buffered
        } else if self.has_more {
            IterState::EmptyMoreExpected
        } else {
            IterState::EmptyExhausted
        }
    }

    /// Counters for this traversal
    pub fn stats(&self) -> IterStats {
        self.stats
    }

    fn ensure_buffered(&mut self) -> Result<bool> {
        if let Some(cause) = self.failure {
            return Err(Error::aborted(self.cursor.as_str(), cause));
        }

        // Pages may be empty yet still declare a next page
        while self.buffer.is_drained() && self.has_more {
            if let Err(e) = self.fetch() {
                self.failure = Some(e.kind());
                return Err(e);
            }
        }

        Ok(!self.buffer.is_drained())
    }

    fn fetch(&mut self) -> Result<()> {
        let page: Page = self
            .fetcher
            .fetch(&self.cursor)?
            .into_page(self.policy)?;
        self.stats.pages_fetched += 1;

        debug!(
            "Fetched page {} from {}: {} item(s)",
            self.stats.pages_fetched,
            self.cursor,
            page.len()
        );

        match page.next {
            Some(next) => self.cursor = next,
            None => {
                debug!("No next page after {}", self.cursor);
                self.has_more = false;
            }
        }
        self.buffer = PageBuffer::new(page.items);
        Ok(())
    }
}

impl<T> Iterator for Items<T> {
    type Item = Result<T>;

    /// Yields each mapped item; a fatal error is yielded once, then `None`
    fn next(&mut self) -> Option<Self::Item> {
        if self.failure.is_some() {
            return None;
        }
        match self.has_next() {
            Ok(true) => Some(self.next_item()),
            Ok(false) => None,
            Err(e) => Some(Err(e)),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let failed = self.failure.is_some();
        let buffered = if failed { 0 } else { self.buffer.remaining() };
        if self.has_more && !failed {
            (buffered, None)
        } else {
            (buffered, Some(buffered))
        }
    }
}

impl<T> FusedIterator for Items<T> {}

impl<T> fmt::Debug for Items<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Items")
            .field("cursor", &self.cursor.as_str())
            .field("state", &self.state())
            .field("buffered", &self.buffer.remaining())
            .field("stats", &self.stats)
            .field("gated", &self.gate.is_some())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Shared Items
// ============================================================================

/// A traversal that several threads can drain together
///
/// `has_next` and `next_item` lock the same mutex, so each call sees the
/// traversal in a consistent state. Note that another thread may consume
/// the item between a caller's `has_next` and its `next_item`; use
/// [`SharedItems::try_next`] to check and consume atomically.
pub struct SharedItems<T> {
    inner: Arc<Mutex<Items<T>>>,
}

impl<T> SharedItems<T> {
    /// Wrap a traversal for shared use
    pub fn new(items: Items<T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(items)),
        }
    }

    /// See [`Items::has_next`]
    pub fn has_next(&self) -> Result<bool> {
        self.lock().has_next()
    }

    /// See [`Items::next_item`]
    pub fn next_item(&self) -> Result<T> {
        self.lock().next_item()
    }

    /// Check and consume under one lock; `Ok(None)` once exhausted
    pub fn try_next(&self) -> Result<Option<T>> {
        let mut items = self.lock();
        if items.has_next()? {
            items.next_item().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Current state of the traversal
    pub fn state(&self) -> IterState {
        self.lock().state()
    }

    /// Counters for the traversal
    pub fn stats(&self) -> IterStats {
        self.lock().stats()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Items<T>> {
        // A panicking mapping leaves the traversal itself consistent
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Clone for SharedItems<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> From<Items<T>> for SharedItems<T> {
    fn from(items: Items<T>) -> Self {
        Self::new(items)
    }
}

impl<T> fmt::Debug for SharedItems<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedItems")
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}
