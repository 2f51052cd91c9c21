//! Error types for the queue layer.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur inside a queue store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Persisted events could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backing file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for queue operations.
pub type QueueResult<T> = Result<T, QueueError>;

/// Errors that can occur in queue operations.
#[derive(Debug, Error)]
pub enum QueueError {
    /// The underlying store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// `start` was called twice.
    #[error("queue drain task already started")]
    AlreadyStarted,

    /// An operation needing the drain task ran before `start`.
    #[error("queue drain task not started")]
    NotStarted,

    /// The batch processor rejected a batch. The batch stays in the store.
    #[error("batch processor failed: {0}")]
    Processor(anyhow::Error),
}
