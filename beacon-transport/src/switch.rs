//! Fallback transport selection.

use crate::error::{TransportError, TransportResult};
use crate::transport::Transport;
use async_trait::async_trait;
use beacon_types::Event;
use tracing::debug;

/// Delegates each batch to the first usable candidate in a priority list.
///
/// Usability is checked once per `handle` call, at handling time. This is
/// selection, not cascading: if the chosen candidate fails, the failure
/// surfaces; the switch does not move on to the next candidate within
/// the same call. The caller's retry schedule gets another chance to pick
/// a (possibly different) candidate later.
pub struct TransportSwitch {
    candidates: Vec<Box<dyn Transport>>,
}

impl TransportSwitch {
    /// Creates a switch over candidates in priority order.
    #[must_use]
    pub fn new(candidates: Vec<Box<dyn Transport>>) -> Self {
        Self { candidates }
    }
}

#[async_trait]
impl Transport for TransportSwitch {
    fn name(&self) -> &'static str {
        "TransportSwitch"
    }

    async fn handle(&self, batch: &[Event]) -> TransportResult<()> {
        let Some(candidate) = self.candidates.iter().find(|c| c.is_usable()) else {
            return Err(TransportError::NoUsableTransport);
        };
        debug!(candidate = candidate.name(), "switch selected candidate");
        candidate.handle(batch).await
    }

    fn is_usable(&self) -> bool {
        self.candidates.iter().any(|c| c.is_usable())
    }
}
