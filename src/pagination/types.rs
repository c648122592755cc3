//! Pagination types and traits
//!
//! Defines the mapping contract, the optional cross-traversal gate and
//! the observable traversal states.

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use serde::de::DeserializeOwned;
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

// ============================================================================
// Mapping
// ============================================================================

/// Turns one raw page item into a typed value
///
/// Implementations must be deterministic and must not depend on
/// traversal state. A traversal calls `map` exactly once per item.
pub trait Mapping<T>: Send + Sync {
    /// Map a raw JSON object to the value a traversal yields
    fn map(&self, object: &JsonObject) -> Result<T>;
}

impl<T, F> Mapping<T> for F
where
    F: Fn(&JsonObject) -> Result<T> + Send + Sync,
{
    fn map(&self, object: &JsonObject) -> Result<T> {
        self(object)
    }
}

/// Yields raw items unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Mapping<JsonObject> for Identity {
    fn map(&self, object: &JsonObject) -> Result<JsonObject> {
        Ok(object.clone())
    }
}

/// Deserializes each item into `T` with serde
pub struct FromJson<T> {
    _marker: PhantomData<fn() -> T>,
}

impl<T> FromJson<T> {
    /// Create a serde mapping
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<T> Default for FromJson<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for FromJson<T> {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for FromJson<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FromJson<{}>", std::any::type_name::<T>())
    }
}

impl<T: DeserializeOwned> Mapping<T> for FromJson<T> {
    fn map(&self, object: &JsonObject) -> Result<T> {
        serde_json::from_value(JsonValue::Object(object.clone()))
            .map_err(|e| Error::mapping(e.to_string()))
    }
}

// ============================================================================
// Fetch Gate
// ============================================================================

/// Shared lock serializing every traversal that holds a clone of it
///
/// Traversals have private state and never block each other unless they
/// were given the same gate. With a gate, each `has_next`/`next_item`
/// call of one traversal runs while no other gated call is in progress,
/// which keeps a shared backend to one request at a time.
#[derive(Clone, Default)]
pub struct FetchGate {
    lock: Arc<Mutex<()>>,
}

impl FetchGate {
    /// Create a new, unshared gate
    pub fn new() -> Self {
        Self::default()
    }

    /// Block until the gate is free and hold it until the guard drops
    pub fn enter(&self) -> MutexGuard<'_, ()> {
        // The guarded data is (), so a poisoned lock carries no broken state
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Check if two handles refer to the same gate
    pub fn same_as(&self, other: &FetchGate) -> bool {
        Arc::ptr_eq(&self.lock, &other.lock)
    }
}

impl fmt::Debug for FetchGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetchGate")
            .field("handles", &Arc::strong_count(&self.lock))
            .finish()
    }
}

// ============================================================================
// Traversal State
// ============================================================================

/// Observable state of a traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterState {
    /// Nothing buffered, another page is expected
    EmptyMoreExpected,
    /// Items of the current page are waiting to be consumed
    Buffered,
    /// Nothing buffered and the last page has been fetched
    EmptyExhausted,
    /// A fetch failed; the traversal cannot advance
    Failed,
}

impl IterState {
    /// Check if no further item can ever be produced
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::EmptyExhausted | Self::Failed)
    }
}

/// Counters for one traversal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IterStats {
    /// Pages fetched so far
    pub pages_fetched: u64,
    /// Items handed to the mapping so far
    pub items_mapped: u64,
}
