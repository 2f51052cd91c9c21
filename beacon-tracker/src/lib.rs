//! Tracker instances and the process-wide tracker registry for Beacon.
//!
//! This crate ties the pipeline together: a [`Tracker`] owns a plugin
//! chain, an optional batching queue and a (possibly composite)
//! transport, and exposes the single `track` entry point producers use.
//! The [`TrackerRepository`] lets producers reach named trackers (or
//! "the" default one) without holding references.
//!
//! # Example
//!
//! ```no_run
//! use beacon_plugins::{ApplicationContextPlugin, PluginManager};
//! use beacon_queue::{EventQueue, MemoryQueueStore, QueueConfig};
//! use beacon_tracker::{Tracker, TrackerConfig};
//! use beacon_transport::{HttpTransport, TransportRetry};
//! use beacon_types::{Context, Event};
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let transport = TransportRetry::new(Box::new(HttpTransport::new(
//!     "https://collector.example.com/events",
//! )?));
//! let queue = EventQueue::new(Arc::new(MemoryQueueStore::new()), QueueConfig::default());
//! let plugins = PluginManager::with_default_sink(vec![Box::new(
//!     ApplicationContextPlugin::new("checkout-web"),
//! )]);
//!
//! let tracker = Tracker::new(
//!     TrackerConfig::new("checkout-web"),
//!     plugins,
//!     Arc::new(transport),
//!     Some(queue),
//! )?;
//!
//! let event = Event::new("PressEvent").with_location_context(Context::root_location("home"));
//! let enriched = tracker.track(event).await?;
//! assert_eq!(enriched.count_global("ApplicationContext"), 1);
//! # Ok(())
//! # }
//! ```

mod error;
mod repository;
mod tracker;

pub use error::{TrackerError, TrackerResult};
pub use repository::TrackerRepository;
pub use tracker::{Tracker, TrackerConfig};
