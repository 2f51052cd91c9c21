//! Fan-out transport composition.

use crate::error::{TransportError, TransportResult};
use crate::transport::Transport;
use async_trait::async_trait;
use beacon_types::Event;
use futures::future::join_all;
use tracing::warn;

/// Delivers every batch to all usable members concurrently.
///
/// Redundant channels should not be penalized for one channel's outage:
/// the group succeeds if *any* member succeeds, and fails as a whole only
/// when every usable member fails. Member failures under a partial
/// success are logged, not surfaced.
pub struct TransportGroup {
    members: Vec<Box<dyn Transport>>,
}

impl TransportGroup {
    /// Creates a group over the given members.
    #[must_use]
    pub fn new(members: Vec<Box<dyn Transport>>) -> Self {
        Self { members }
    }
}

#[async_trait]
impl Transport for TransportGroup {
    fn name(&self) -> &'static str {
        "TransportGroup"
    }

    async fn handle(&self, batch: &[Event]) -> TransportResult<()> {
        let usable: Vec<&dyn Transport> = self
            .members
            .iter()
            .filter(|m| m.is_usable())
            .map(|m| m.as_ref())
            .collect();
        if usable.is_empty() {
            return Err(TransportError::NoUsableTransport);
        }

        let outcomes = join_all(usable.iter().map(|m| m.handle(batch))).await;

        let mut any_ok = false;
        for (member, outcome) in usable.iter().zip(&outcomes) {
            match outcome {
                Ok(()) => any_ok = true,
                Err(error) => {
                    warn!(member = member.name(), %error, "group member failed delivery");
                }
            }
        }

        if any_ok {
            Ok(())
        } else {
            Err(TransportError::AllMembersFailed)
        }
    }

    fn is_usable(&self) -> bool {
        self.members.iter().any(|m| m.is_usable())
    }
}
