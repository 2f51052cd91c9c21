//! Tracker instances.
//!
//! A tracker binds a plugin chain, an optional queue and a transport
//! into the single entry point producers call: [`Tracker::track`].
//! Trackers are assembled once at application start and are immutable
//! afterwards; their composition is fixed at construction.

use crate::error::TrackerResult;
use async_trait::async_trait;
use beacon_plugins::PluginManager;
use beacon_queue::{BatchProcessor, EventQueue};
use beacon_transport::Transport;
use beacon_types::Event;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Tracker identity and naming.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Application this tracker reports for.
    pub application_id: String,
    /// Registry name; defaults to the application id.
    pub tracker_id: Option<String>,
}

impl TrackerConfig {
    /// Configuration with the tracker named after the application.
    #[must_use]
    pub fn new(application_id: impl Into<String>) -> Self {
        Self {
            application_id: application_id.into(),
            tracker_id: None,
        }
    }

    /// Overrides the registry name.
    #[must_use]
    pub fn with_tracker_id(mut self, tracker_id: impl Into<String>) -> Self {
        self.tracker_id = Some(tracker_id.into());
        self
    }
}

/// Bridges the queue's processor seam to a transport.
struct TransportProcessor {
    transport: Arc<dyn Transport>,
}

#[async_trait]
impl BatchProcessor for TransportProcessor {
    async fn process(&self, batch: &[Event]) -> anyhow::Result<()> {
        self.transport.handle(batch).await?;
        Ok(())
    }
}

/// The "submit event" entry point used by all producers.
///
/// With a queue, [`track`](Tracker::track) returns once the event is
/// buffered and the drain task delivers in the background. Without one,
/// delivery is fired and forgotten on a spawned task; an event a failing
/// transport could not deliver is lost.
pub struct Tracker {
    application_id: String,
    tracker_id: String,
    plugins: PluginManager,
    queue: Option<Arc<EventQueue>>,
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for Tracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tracker")
            .field("application_id", &self.application_id)
            .field("tracker_id", &self.tracker_id)
            .field("has_queue", &self.queue.is_some())
            .finish_non_exhaustive()
    }
}

impl Tracker {
    /// Assembles a tracker and runs the plugins' `initialize` hooks.
    ///
    /// If a queue is given, its drain task is started here, delivering to
    /// `transport`; construction therefore needs a running tokio runtime.
    pub fn new(
        config: TrackerConfig,
        plugins: PluginManager,
        transport: Arc<dyn Transport>,
        queue: Option<EventQueue>,
    ) -> TrackerResult<Self> {
        let queue = match queue {
            Some(queue) => {
                queue.start(Arc::new(TransportProcessor {
                    transport: Arc::clone(&transport),
                }))?;
                Some(Arc::new(queue))
            }
            None => None,
        };

        let tracker = Self {
            tracker_id: config
                .tracker_id
                .unwrap_or_else(|| config.application_id.clone()),
            application_id: config.application_id,
            plugins,
            queue,
            transport,
        };
        tracker.plugins.initialize_all();
        debug!(
            tracker_id = %tracker.tracker_id,
            queued = tracker.queue.is_some(),
            "tracker ready"
        );
        Ok(tracker)
    }

    /// The application this tracker reports for.
    #[must_use]
    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    /// The name this tracker registers under.
    #[must_use]
    pub fn tracker_id(&self) -> &str {
        &self.tracker_id
    }

    /// The plugin chain.
    #[must_use]
    pub fn plugins(&self) -> &PluginManager {
        &self.plugins
    }

    /// Whether this tracker can currently deliver events.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.transport.is_usable()
    }

    /// Events buffered and not yet delivered. Zero without a queue.
    pub async fn pending(&self) -> TrackerResult<usize> {
        match &self.queue {
            Some(queue) => Ok(queue.count().await?),
            None => Ok(0),
        }
    }

    /// Validates, enriches and submits an event.
    ///
    /// Validation runs first, on the event as the producer built it;
    /// violations are reported to the error sink and never block.
    /// Enrichment then appends plugin contexts, the event is frozen, and
    /// it is queued (or fired directly). The enriched event is returned
    /// without waiting for network delivery.
    pub async fn track(&self, event: Event) -> TrackerResult<Event> {
        self.plugins.validate(&event);

        let mut contexts = event.contexts();
        self.plugins.enrich(&mut contexts);
        let event = event.with_contexts(contexts);

        match &self.queue {
            Some(queue) => queue.push(event.clone()).await?,
            None => {
                let transport = Arc::clone(&self.transport);
                let batch = vec![event.clone()];
                tokio::spawn(async move {
                    if let Err(error) = transport.handle(&batch).await {
                        warn!(%error, "direct delivery failed, event dropped");
                    }
                });
            }
        }

        Ok(event)
    }

    /// Blocks until all queued events are delivered or the timeout hits.
    ///
    /// Returns `true` if the queue fully emptied. A tracker without a
    /// queue has nothing to wait for.
    pub async fn flush(&self, timeout: Option<Duration>) -> TrackerResult<bool> {
        match &self.queue {
            Some(queue) => Ok(queue.flush(timeout).await?),
            None => Ok(true),
        }
    }

    /// Best-effort teardown: a bounded flush, then the drain task stops.
    ///
    /// Events the flush could not deliver stay in the queue store; a
    /// persistent store hands them to the next process.
    pub async fn stop(&self, timeout: Option<Duration>) {
        if let Some(queue) = &self.queue {
            match queue.flush(timeout).await {
                Ok(true) => {}
                Ok(false) => warn!("stopping with undelivered events still queued"),
                Err(error) => warn!(%error, "flush during stop failed"),
            }
            queue.stop().await;
        }
    }
}
