//! Error types for the transport layer.

use thiserror::Error;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Errors that can occur while delivering a batch.
///
/// Every variant is a failed delivery *attempt* from the caller's point
/// of view; the queue keeps the batch persisted and retries on its own
/// schedule regardless of which variant surfaced.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request never got a usable response.
    #[error("network error: {0}")]
    Network(String),

    /// The collector answered with a non-success status.
    #[error("collector rejected the batch: HTTP {status}")]
    Rejected { status: u16 },

    /// No candidate in a switch/group is currently usable.
    #[error("no usable transport")]
    NoUsableTransport,

    /// Every usable member of a group failed.
    #[error("all usable transport group members failed")]
    AllMembersFailed,

    /// A retry wrapper ran out of attempts.
    #[error("delivery failed after {attempts} attempts: {last_error}")]
    RetryExhausted {
        attempts: u32,
        #[source]
        last_error: Box<TransportError>,
    },

    /// The batch could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The transport was configured with a bad endpoint.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
}
