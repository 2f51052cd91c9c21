//! Error types for the tracker layer.

use thiserror::Error;

/// Result type for tracker operations.
pub type TrackerResult<T> = Result<T, TrackerError>;

/// Errors that can occur in tracker operations.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// A repository lookup without a name found no default tracker.
    #[error("no default tracker registered")]
    NoDefaultTracker,

    /// A repository lookup by name found nothing.
    #[error("no tracker registered under '{0}'")]
    TrackerNotFound(String),

    /// The tracker's queue failed.
    #[error("queue error: {0}")]
    Queue(#[from] beacon_queue::QueueError),

    /// The tracker's transport failed.
    #[error("transport error: {0}")]
    Transport(#[from] beacon_transport::TransportError),
}
