//! Transport abstraction.
//!
//! Defines the delivery contract every concrete transport and every
//! composite re-exposes, so compositions nest arbitrarily.

use crate::error::TransportResult;
use async_trait::async_trait;
use beacon_types::Event;

/// A unit of batch delivery.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Stable name used in logs and reports.
    fn name(&self) -> &'static str;

    /// Attempts to deliver the batch, preserving its internal order.
    ///
    /// An `Err` means this attempt failed as a whole; the caller decides
    /// whether and when to try again.
    async fn handle(&self, batch: &[Event]) -> TransportResult<()>;

    /// Whether the transport can currently deliver at all.
    ///
    /// Unusable is an environment statement, not an error; a composite
    /// skips unusable children without reporting anything.
    fn is_usable(&self) -> bool {
        true
    }
}

/// Mock transports for testing compositions and queues.
pub mod mock {
    use super::*;
    use crate::error::TransportError;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// Records every batch it is handed. Always succeeds.
    ///
    /// Clones share state, so a test can keep a handle to a transport
    /// that was moved into a composite.
    #[derive(Clone, Default)]
    pub struct RecordingTransport {
        inner: Arc<RecordingInner>,
    }

    #[derive(Default)]
    struct RecordingInner {
        batches: Mutex<Vec<Vec<Event>>>,
        usable: AtomicBool,
    }

    impl RecordingTransport {
        /// Creates a usable recording transport.
        #[must_use]
        pub fn new() -> Self {
            let transport = Self::default();
            transport.inner.usable.store(true, Ordering::SeqCst);
            transport
        }

        /// Flips usability at runtime.
        pub fn set_usable(&self, usable: bool) {
            self.inner.usable.store(usable, Ordering::SeqCst);
        }

        /// All recorded batches, in delivery order.
        #[must_use]
        pub fn batches(&self) -> Vec<Vec<Event>> {
            self.inner.batches.lock().unwrap().clone()
        }

        /// Number of `handle` calls that reached this transport.
        #[must_use]
        pub fn batch_count(&self) -> usize {
            self.inner.batches.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        fn name(&self) -> &'static str {
            "RecordingTransport"
        }

        async fn handle(&self, batch: &[Event]) -> TransportResult<()> {
            self.inner.batches.lock().unwrap().push(batch.to_vec());
            Ok(())
        }

        fn is_usable(&self) -> bool {
            self.inner.usable.load(Ordering::SeqCst)
        }
    }

    /// Fails the first `failures` deliveries, then records like
    /// [`RecordingTransport`].
    #[derive(Clone)]
    pub struct FlakyTransport {
        failures: usize,
        attempts: Arc<AtomicUsize>,
        recorder: RecordingTransport,
    }

    impl FlakyTransport {
        /// Creates a transport that fails its first `failures` attempts.
        #[must_use]
        pub fn new(failures: usize) -> Self {
            Self {
                failures,
                attempts: Arc::new(AtomicUsize::new(0)),
                recorder: RecordingTransport::new(),
            }
        }

        /// Total `handle` invocations, failed and successful.
        #[must_use]
        pub fn attempts(&self) -> usize {
            self.attempts.load(Ordering::SeqCst)
        }

        /// Batches that made it through.
        #[must_use]
        pub fn batches(&self) -> Vec<Vec<Event>> {
            self.recorder.batches()
        }
    }

    #[async_trait]
    impl Transport for FlakyTransport {
        fn name(&self) -> &'static str {
            "FlakyTransport"
        }

        async fn handle(&self, batch: &[Event]) -> TransportResult<()> {
            let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
            if attempt <= self.failures {
                return Err(TransportError::Network(format!(
                    "simulated outage (attempt {attempt})"
                )));
            }
            self.recorder.handle(batch).await
        }
    }

    /// Always fails with a network error.
    #[derive(Clone, Default)]
    pub struct FailingTransport {
        attempts: Arc<AtomicUsize>,
    }

    impl FailingTransport {
        /// Creates a transport that never delivers.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Number of failed attempts so far.
        #[must_use]
        pub fn attempts(&self) -> usize {
            self.attempts.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Transport for FailingTransport {
        fn name(&self) -> &'static str {
            "FailingTransport"
        }

        async fn handle(&self, _batch: &[Event]) -> TransportResult<()> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(TransportError::Network("simulated outage".into()))
        }
    }

    /// Declares itself unusable; `handle` should never be reached.
    #[derive(Clone, Default)]
    pub struct UnusableTransport {
        handled: Arc<AtomicUsize>,
    }

    impl UnusableTransport {
        /// Creates an unusable transport.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// How often `handle` was (wrongly) invoked anyway.
        #[must_use]
        pub fn handled(&self) -> usize {
            self.handled.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Transport for UnusableTransport {
        fn name(&self) -> &'static str {
            "UnusableTransport"
        }

        async fn handle(&self, _batch: &[Event]) -> TransportResult<()> {
            self.handled.fetch_add(1, Ordering::SeqCst);
            Err(TransportError::NoUsableTransport)
        }

        fn is_usable(&self) -> bool {
            false
        }
    }
}
