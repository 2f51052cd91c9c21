//! Bounded retries with backoff.

use crate::error::{TransportError, TransportResult};
use crate::transport::Transport;
use async_trait::async_trait;
use beacon_types::Event;
use std::time::Duration;
use tracing::{debug, warn};

/// Retry policy: capped exponential backoff.
///
/// The delay before retry `n` (1-based) is
/// `initial_delay * factor^(n-1)`, clamped to `max_delay`. Any monotonic
/// curve works here; the cap keeps the worst case bounded.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total delivery attempts, including the first. At least one attempt
    /// is always made.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Multiplier applied per subsequent retry.
    pub factor: f64,
    /// Upper bound on any single delay.
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            initial_delay: Duration::from_secs(1),
            factor: 2.0,
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryConfig {
    /// Delay to sleep after the `attempt`-th failure (1-based).
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = self.factor.powi(attempt.saturating_sub(1) as i32);
        let secs = self.initial_delay.as_secs_f64() * factor;
        // Clamping also catches overflow to infinity from huge factors.
        let secs = secs.clamp(0.0, self.max_delay.as_secs_f64());
        Duration::from_secs_f64(secs)
    }
}

/// Wraps one transport and retries failed batches.
///
/// A success at any attempt short-circuits the rest. Exhausting all
/// attempts surfaces [`TransportError::RetryExhausted`] with the final
/// underlying error, and the caller (the queue) keeps the batch
/// persisted for a later drain cycle.
pub struct TransportRetry {
    inner: Box<dyn Transport>,
    config: RetryConfig,
}

impl TransportRetry {
    /// Wraps `inner` with the default retry policy.
    #[must_use]
    pub fn new(inner: Box<dyn Transport>) -> Self {
        Self::with_config(inner, RetryConfig::default())
    }

    /// Wraps `inner` with a custom retry policy.
    #[must_use]
    pub fn with_config(inner: Box<dyn Transport>, config: RetryConfig) -> Self {
        Self { inner, config }
    }
}

#[async_trait]
impl Transport for TransportRetry {
    fn name(&self) -> &'static str {
        "TransportRetry"
    }

    async fn handle(&self, batch: &[Event]) -> TransportResult<()> {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            match self.inner.handle(batch).await {
                Ok(()) => {
                    if attempt > 1 {
                        debug!(attempt, "delivery succeeded after retries");
                    }
                    return Ok(());
                }
                Err(error) => {
                    if attempt >= max_attempts {
                        return Err(TransportError::RetryExhausted {
                            attempts: attempt,
                            last_error: Box::new(error),
                        });
                    }
                    let delay = self.config.delay_for(attempt);
                    warn!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        %error,
                        "delivery attempt failed, backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    fn is_usable(&self) -> bool {
        self.inner.is_usable()
    }
}
