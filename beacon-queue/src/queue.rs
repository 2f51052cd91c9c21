//! The batching queue and its drain task.

use crate::error::{QueueError, QueueResult};
use crate::store::QueueStore;
use async_trait::async_trait;
use beacon_types::{Event, EventId};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{Notify, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// How often a flush call re-checks the store while waiting.
const FLUSH_POLL: Duration = Duration::from_millis(20);

/// Queue tuning knobs.
#[derive(Debug, Clone)]
pub struct QueueConfig {
    /// Maximum events per delivered batch; reaching this count triggers
    /// an immediate drain.
    pub batch_size: usize,
    /// How long a partial batch may sit before it is drained anyway.
    pub drain_interval: Duration,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            batch_size: 10,
            drain_interval: Duration::from_secs(1),
        }
    }
}

/// Receives drained batches. The delivery side of the queue seam.
///
/// A returned error means the whole batch failed; the queue keeps it in
/// the store and tries again on the next cycle.
#[async_trait]
pub trait BatchProcessor: Send + Sync {
    async fn process(&self, batch: &[Event]) -> anyhow::Result<()>;
}

/// Buffers events in a [`QueueStore`] and releases them in FIFO batches.
///
/// One background task owns all draining, so at most one drain is in
/// flight at any time; `push` is safe to call concurrently with an
/// in-flight drain. With an empty store the task parks on a signal and
/// does no timer work.
pub struct EventQueue {
    store: Arc<dyn QueueStore>,
    config: QueueConfig,
    /// Woken by any push, so a parked task notices the store is non-empty.
    wake_nonempty: Arc<Notify>,
    /// Woken when a full batch accumulated or a flush wants a drain now.
    wake_drain: Arc<Notify>,
    worker: Mutex<Option<Worker>>,
}

struct Worker {
    handle: JoinHandle<()>,
    shutdown: watch::Sender<bool>,
}

impl EventQueue {
    /// Creates a queue over the given store. Call [`EventQueue::start`]
    /// to begin draining.
    #[must_use]
    pub fn new(store: Arc<dyn QueueStore>, config: QueueConfig) -> Self {
        Self {
            store,
            config,
            wake_nonempty: Arc::new(Notify::new()),
            wake_drain: Arc::new(Notify::new()),
            worker: Mutex::new(None),
        }
    }

    /// The store events are buffered in.
    #[must_use]
    pub fn store(&self) -> Arc<dyn QueueStore> {
        Arc::clone(&self.store)
    }

    /// Number of events waiting for delivery.
    pub async fn count(&self) -> QueueResult<usize> {
        Ok(self.store.count().await?)
    }

    /// Whether the drain task is running.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.worker.lock().unwrap().is_some()
    }

    /// Spawns the drain task delivering batches to `processor`.
    ///
    /// Events pushed before `start` are already in the store and are
    /// picked up by the first drain cycle.
    pub fn start(&self, processor: Arc<dyn BatchProcessor>) -> QueueResult<()> {
        let mut worker = self.worker.lock().unwrap();
        if worker.is_some() {
            return Err(QueueError::AlreadyStarted);
        }

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(run_drain_loop(
            Arc::clone(&self.store),
            self.config.clone(),
            Arc::clone(&self.wake_nonempty),
            Arc::clone(&self.wake_drain),
            shutdown_rx,
            processor,
        ));
        *worker = Some(Worker {
            handle,
            shutdown: shutdown_tx,
        });
        Ok(())
    }

    /// Appends an event to the store and nudges the drain task.
    ///
    /// Returns as soon as the store write completes; delivery is the
    /// drain task's business.
    pub async fn push(&self, event: Event) -> QueueResult<()> {
        self.store.write(std::slice::from_ref(&event)).await?;
        let pending = self.store.count().await?;
        self.wake_nonempty.notify_one();
        if pending >= self.config.batch_size {
            self.wake_drain.notify_waiters();
        }
        Ok(())
    }

    /// Forces an immediate drain and waits until the store is empty.
    ///
    /// Returns `true` if the queue fully emptied, `false` on timeout
    /// (the remaining events stay queued and keep their retry schedule).
    /// With `timeout = None` the wait is unbounded.
    pub async fn flush(&self, timeout: Option<Duration>) -> QueueResult<bool> {
        if !self.is_started() {
            return Err(QueueError::NotStarted);
        }

        let deadline = timeout.map(|t| tokio::time::Instant::now() + t);
        loop {
            if self.store.count().await? == 0 {
                return Ok(true);
            }
            self.wake_nonempty.notify_one();
            self.wake_drain.notify_waiters();
            if let Some(deadline) = deadline {
                if tokio::time::Instant::now() >= deadline {
                    return Ok(false);
                }
            }
            tokio::time::sleep(FLUSH_POLL).await;
        }
    }

    /// Stops the drain task cooperatively: an in-flight drain finishes,
    /// then the task exits. Queued events stay in the store.
    pub async fn stop(&self) {
        let worker = self.worker.lock().unwrap().take();
        if let Some(worker) = worker {
            let _ = worker.shutdown.send(true);
            self.wake_nonempty.notify_one();
            if worker.handle.await.is_err() {
                warn!("queue drain task panicked during shutdown");
            }
        }
    }
}

async fn run_drain_loop(
    store: Arc<dyn QueueStore>,
    config: QueueConfig,
    wake_nonempty: Arc<Notify>,
    wake_drain: Arc<Notify>,
    mut shutdown: watch::Receiver<bool>,
    processor: Arc<dyn BatchProcessor>,
) {
    debug!(
        batch_size = config.batch_size,
        interval_ms = config.drain_interval.as_millis() as u64,
        "queue drain task started"
    );

    loop {
        if *shutdown.borrow() {
            break;
        }

        let pending = match store.count().await {
            Ok(pending) => pending,
            Err(error) => {
                warn!(%error, "queue store unreadable, retrying after interval");
                tokio::select! {
                    _ = tokio::time::sleep(config.drain_interval) => {}
                    _ = shutdown.changed() => {}
                }
                continue;
            }
        };

        if pending == 0 {
            // Idle: park until a push arrives. No timer work.
            tokio::select! {
                _ = wake_nonempty.notified() => {}
                _ = shutdown.changed() => {}
            }
            continue;
        }

        if pending < config.batch_size {
            // Partial batch: wait for the interval, a batch-completing
            // push, or a flush, then drain whatever is there.
            tokio::select! {
                _ = tokio::time::sleep(config.drain_interval) => {}
                _ = wake_drain.notified() => {}
                _ = shutdown.changed() => {}
            }
            if *shutdown.borrow() {
                break;
            }
        }

        match drain_once(store.as_ref(), &config, processor.as_ref()).await {
            Ok(delivered) => {
                if delivered > 0 {
                    debug!(delivered, "batch delivered");
                }
            }
            Err(error) => {
                // The batch stays in the store; back off for one interval.
                // Attempt-level backoff belongs to the transport layer.
                warn!(%error, "drain failed, batch kept for a later attempt");
                tokio::select! {
                    _ = tokio::time::sleep(config.drain_interval) => {}
                    _ = shutdown.changed() => {}
                }
            }
        }
    }

    debug!("queue drain task stopped");
}

/// Reads one batch, hands it to the processor, deletes it on success.
async fn drain_once(
    store: &dyn QueueStore,
    config: &QueueConfig,
    processor: &dyn BatchProcessor,
) -> QueueResult<usize> {
    let batch = store.read(config.batch_size).await?;
    if batch.is_empty() {
        return Ok(0);
    }

    debug!(batch_len = batch.len(), "draining batch");
    processor
        .process(&batch)
        .await
        .map_err(QueueError::Processor)?;

    let ids: Vec<EventId> = batch.iter().map(|e| e.id).collect();
    store.delete(&ids).await?;
    Ok(ids.len())
}
