//! Queue store abstraction.
//!
//! A store holds queued, not-yet-delivered events keyed by their id, in
//! insertion order. The order invariant is the load-bearing part of the
//! contract: `read` returns events exactly as they were written, and a
//! `delete` of delivered ids must not reorder what remains.

use crate::error::StoreResult;
use async_trait::async_trait;
use beacon_types::{Event, EventId};
use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;

/// Persistence backend for queued events.
#[async_trait]
pub trait QueueStore: Send + Sync {
    /// Number of events currently stored.
    async fn count(&self) -> StoreResult<usize>;

    /// Reads up to `max` events in insertion order, without removing them.
    async fn read(&self, max: usize) -> StoreResult<Vec<Event>>;

    /// Appends events, preserving the given order.
    async fn write(&self, events: &[Event]) -> StoreResult<()>;

    /// Removes the events with the given ids. Unknown ids are ignored.
    async fn delete(&self, ids: &[EventId]) -> StoreResult<()>;

    /// Removes everything.
    async fn clear(&self) -> StoreResult<()>;
}

/// In-memory store. The default for trackers that accept losing queued
/// events on process exit.
#[derive(Debug, Default)]
pub struct MemoryQueueStore {
    events: Mutex<VecDeque<Event>>,
}

impl MemoryQueueStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QueueStore for MemoryQueueStore {
    async fn count(&self) -> StoreResult<usize> {
        Ok(self.events.lock().unwrap().len())
    }

    async fn read(&self, max: usize) -> StoreResult<Vec<Event>> {
        Ok(self
            .events
            .lock()
            .unwrap()
            .iter()
            .take(max)
            .cloned()
            .collect())
    }

    async fn write(&self, events: &[Event]) -> StoreResult<()> {
        self.events.lock().unwrap().extend(events.iter().cloned());
        Ok(())
    }

    async fn delete(&self, ids: &[EventId]) -> StoreResult<()> {
        let ids: HashSet<&EventId> = ids.iter().collect();
        self.events.lock().unwrap().retain(|e| !ids.contains(&e.id));
        Ok(())
    }

    async fn clear(&self) -> StoreResult<()> {
        self.events.lock().unwrap().clear();
        Ok(())
    }
}
