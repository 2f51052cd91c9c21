//! Store-backed batching queue for Beacon.
//!
//! The queue decouples "event happened" from "event was sent": producers
//! push events into a pluggable [`QueueStore`], and a single background
//! drain task releases them in FIFO batches to a [`BatchProcessor`] on a
//! timer or as soon as a full batch accumulates.
//!
//! Delivery is at-least-once within a queue's lifetime: an event is only
//! deleted from the store after its batch was processed successfully, so
//! a crash between send and delete may redeliver. Stores that persist
//! (see [`FileQueueStore`]) extend that across process restarts.

mod error;
mod file_store;
mod queue;
mod store;

pub use error::{QueueError, QueueResult, StoreError, StoreResult};
pub use file_store::FileQueueStore;
pub use queue::{BatchProcessor, EventQueue, QueueConfig};
pub use store::{MemoryQueueStore, QueueStore};
