//! Tracking events.
//!
//! Events are the unit of everything downstream: validation, enrichment,
//! queueing and batch delivery. Each event is immutable once enrichment
//! has completed and carries all information the collector needs.

use crate::{Context, Contexts, EventId, Timestamp};
use serde::{Deserialize, Serialize};

/// An immutable record of something that happened.
///
/// The serialized shape is what goes over the wire to collectors:
/// `_type`, `id`, `time`, `location_stack`, `global_contexts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Discriminator, e.g. `PressEvent`. Never empty.
    #[serde(rename = "_type")]
    pub event_type: String,

    /// Unique identifier, assigned at construction.
    pub id: EventId,

    /// When the event was constructed (ms since epoch).
    pub time: Timestamp,

    /// Root-to-leaf path describing where the event originated.
    /// Order is semantically significant.
    pub location_stack: Vec<Context>,

    /// Ambient metadata in insertion order. Duplicates are preserved and
    /// left to validation rules to judge.
    pub global_contexts: Vec<Context>,
}

impl Event {
    /// Creates an event with a fresh id and the current time.
    ///
    /// Panics in debug builds if `event_type` is empty; use [`Event::try_new`]
    /// when the type comes from untrusted input.
    #[must_use]
    pub fn new(event_type: impl Into<String>) -> Self {
        let event_type = event_type.into();
        debug_assert!(!event_type.is_empty(), "event type must be non-empty");
        Self {
            event_type,
            id: EventId::new(),
            time: Timestamp::now(),
            location_stack: Vec::new(),
            global_contexts: Vec::new(),
        }
    }

    /// Creates an event, rejecting an empty type.
    pub fn try_new(event_type: impl Into<String>) -> crate::Result<Self> {
        let event_type = event_type.into();
        if event_type.is_empty() {
            return Err(crate::Error::InvalidEvent(
                "event type must be non-empty".into(),
            ));
        }
        Ok(Self::new(event_type))
    }

    /// Appends a location context at the leaf end of the stack.
    #[must_use]
    pub fn with_location_context(mut self, context: Context) -> Self {
        self.location_stack.push(context);
        self
    }

    /// Appends a global context.
    #[must_use]
    pub fn with_global_context(mut self, context: Context) -> Self {
        self.global_contexts.push(context);
        self
    }

    /// Copies this event's contexts into a mutable holder for enrichment.
    #[must_use]
    pub fn contexts(&self) -> Contexts {
        Contexts {
            location_stack: self.location_stack.clone(),
            global_contexts: self.global_contexts.clone(),
        }
    }

    /// Rebuilds the event with enriched contexts, keeping id, type and time.
    ///
    /// This is the single point where enrichment output becomes part of an
    /// event; the result is frozen from the pipeline's point of view.
    #[must_use]
    pub fn with_contexts(self, contexts: Contexts) -> Self {
        Self {
            location_stack: contexts.location_stack,
            global_contexts: contexts.global_contexts,
            ..self
        }
    }

    /// Counts global contexts with the given discriminator.
    #[must_use]
    pub fn count_global(&self, context_type: &str) -> usize {
        self.global_contexts
            .iter()
            .filter(|c| c.context_type == context_type)
            .count()
    }

    /// Counts location contexts with the given discriminator.
    #[must_use]
    pub fn count_location(&self, context_type: &str) -> usize {
        self.location_stack
            .iter()
            .filter(|c| c.context_type == context_type)
            .count()
    }
}
