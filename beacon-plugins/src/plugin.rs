//! The plugin hook trait.

use crate::sink::ErrorSink;
use beacon_types::{Contexts, Event};

/// Result type for plugin hooks.
pub type PluginResult<T> = Result<T, PluginError>;

/// Errors a plugin hook may return.
///
/// A hook error is always contained by the [`PluginManager`]: it is
/// reported to the error sink and the remaining plugins still run.
///
/// [`PluginManager`]: crate::PluginManager
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// The hook could not do its work (bad environment, failed provider).
    #[error("{0}")]
    Hook(String),

    /// Building context properties failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A unit of pipeline extension with optional lifecycle hooks.
///
/// Every hook has a default no-op implementation, so a plugin implements
/// only the phases it cares about; a plugin with just `initialize` is a
/// pure side-effect/setup plugin. Hooks run in plugin registration order.
pub trait TrackerPlugin: Send + Sync {
    /// Stable name used in reports and logs.
    fn name(&self) -> &'static str;

    /// Called once when the owning tracker is constructed.
    fn initialize(&self) -> PluginResult<()> {
        Ok(())
    }

    /// Appends contexts before the event is frozen and queued.
    ///
    /// This is the only phase allowed to mutate contexts. A later plugin
    /// sees what earlier plugins appended.
    fn enrich(&self, _contexts: &mut Contexts) -> PluginResult<()> {
        Ok(())
    }

    /// Checks the event and reports violations to the sink.
    ///
    /// Reporting is the observable outcome; validation never blocks or
    /// alters delivery, so this hook has no pass/fail result beyond
    /// infrastructure errors.
    fn validate(&self, _event: &Event, _sink: &dyn ErrorSink) -> PluginResult<()> {
        Ok(())
    }

    /// Whether the plugin is applicable in the current environment.
    ///
    /// An unusable plugin is skipped silently; it is not an error.
    fn is_usable(&self) -> bool {
        true
    }
}
