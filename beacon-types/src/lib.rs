//! Core type definitions for Beacon.
//!
//! This crate defines the fundamental, transport-agnostic types used
//! throughout the pipeline:
//! - Event identifiers (UUID v7) and millisecond timestamps
//! - Location and global contexts (the "where" and "ambient" metadata)
//! - Immutable tracking events with their JSON wire shape
//!
//! Everything that moves through a queue or a transport is built from
//! these types. Enrichment, validation, batching and delivery live in
//! their own crates.

mod context;
mod event;
mod ids;
mod timestamp;

pub use context::{Context, Contexts};
pub use event::Event;
pub use ids::EventId;
pub use timestamp::Timestamp;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),

    #[error("invalid event: {0}")]
    InvalidEvent(String),
}
