//! File-backed queue store.
//!
//! Persists queued events so they survive a process restart: the store
//! mirrors its contents in memory and rewrites a single JSON file on
//! every mutation, via a temp file and an atomic rename so a crash
//! mid-write never corrupts the durable copy.
//!
//! Suited to client-side queue depths (tens to hundreds of events);
//! rewriting the whole file per mutation is the price of the simple
//! recovery story.

use crate::error::{StoreError, StoreResult};
use crate::store::QueueStore;
use async_trait::async_trait;
use beacon_types::{Event, EventId};
use std::collections::{HashSet, VecDeque};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::debug;

/// Durable queue store backed by a JSON file.
pub struct FileQueueStore {
    path: PathBuf,
    events: Mutex<VecDeque<Event>>,
    /// Serializes persist cycles so concurrent mutations cannot land
    /// snapshots out of order.
    persist_lock: tokio::sync::Mutex<()>,
}

impl FileQueueStore {
    /// Opens the store, loading any events a previous process left behind.
    ///
    /// A missing file is an empty store, not an error.
    pub async fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let events: VecDeque<Event> = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice::<Vec<Event>>(&bytes)?.into(),
            Err(error) if error.kind() == ErrorKind::NotFound => VecDeque::new(),
            Err(error) => return Err(StoreError::Io(error)),
        };
        debug!(path = %path.display(), recovered = events.len(), "opened file queue store");
        Ok(Self {
            path,
            events: Mutex::new(events),
            persist_lock: tokio::sync::Mutex::new(()),
        })
    }

    /// The file this store persists to.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    async fn persist(&self) -> StoreResult<()> {
        let _guard = self.persist_lock.lock().await;
        let snapshot: Vec<Event> = self.events.lock().unwrap().iter().cloned().collect();
        let bytes = serde_json::to_vec(&snapshot)?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl QueueStore for FileQueueStore {
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
        self.persist().await
    }

    async fn delete(&self, ids: &[EventId]) -> StoreResult<()> {
        let ids: HashSet<&EventId> = ids.iter().collect();
        self.events.lock().unwrap().retain(|e| !ids.contains(&e.id));
        self.persist().await
    }

    async fn clear(&self) -> StoreResult<()> {
        self.events.lock().unwrap().clear();
        self.persist().await
    }
}
