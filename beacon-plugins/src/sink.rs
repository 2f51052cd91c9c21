//! Where violations and plugin failures are reported.
//!
//! The pipeline never throws instrumentation problems at the host
//! application; it hands them to an [`ErrorSink`]. The default sink
//! forwards to `tracing`; the recording sink keeps a replayable log and
//! doubles as the test observer.

use beacon_types::{Event, EventId};
use std::sync::Mutex;

/// How serious a report is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Receives `(severity, message, optional event)` reports.
///
/// Implementations must be cheap and must not fail; a sink is called from
/// the hot tracking path.
pub trait ErrorSink: Send + Sync {
    fn report(&self, severity: Severity, message: &str, event: Option<&Event>);
}

/// Default sink: forwards reports to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
    fn report(&self, severity: Severity, message: &str, event: Option<&Event>) {
        let event_id = event.map(|e| e.id.to_string());
        let event_id = event_id.as_deref();
        match severity {
            Severity::Info => tracing::info!(event_id, "{message}"),
            Severity::Warning => tracing::warn!(event_id, "{message}"),
            Severity::Error => tracing::error!(event_id, "{message}"),
        }
    }
}

/// A single recorded report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedReport {
    pub severity: Severity,
    pub message: String,
    pub event_id: Option<EventId>,
    pub event_type: Option<String>,
}

/// Sink that appends every report to an in-memory log.
///
/// Useful for developer tooling that replays what went wrong, and as the
/// observer in tests.
#[derive(Debug, Default)]
pub struct RecordingSink {
    reports: Mutex<Vec<RecordedReport>>,
}

impl RecordingSink {
    /// Creates an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all reports, in report order.
    #[must_use]
    pub fn reports(&self) -> Vec<RecordedReport> {
        self.reports.lock().unwrap().clone()
    }

    /// Returns just the messages, in report order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.reports
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.message.clone())
            .collect()
    }

    /// Whether anything has been reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reports.lock().unwrap().is_empty()
    }

    /// Drops all recorded reports.
    pub fn clear(&self) {
        self.reports.lock().unwrap().clear();
    }
}

impl ErrorSink for RecordingSink {
    fn report(&self, severity: Severity, message: &str, event: Option<&Event>) {
        self.reports.lock().unwrap().push(RecordedReport {
            severity,
            message: message.to_string(),
            event_id: event.map(|e| e.id),
            event_type: event.map(|e| e.event_type.clone()),
        });
    }
}
