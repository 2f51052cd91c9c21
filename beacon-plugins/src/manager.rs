//! Ordered plugin dispatch.

use crate::plugin::TrackerPlugin;
use crate::sink::{ErrorSink, Severity, TracingSink};
use beacon_types::{Contexts, Event};
use std::sync::Arc;
use tracing::debug;

/// Owns an ordered list of plugins and drives their lifecycle.
///
/// Dispatch rules, identical for every hook:
/// - plugins run in registration order
/// - unusable plugins are skipped silently
/// - a hook error is reported to the sink and the remaining plugins run
///
/// The manager is assembled once, at tracker construction, and is
/// immutable afterwards.
pub struct PluginManager {
    plugins: Vec<Box<dyn TrackerPlugin>>,
    sink: Arc<dyn ErrorSink>,
}

impl PluginManager {
    /// Creates a manager reporting to the given sink.
    #[must_use]
    pub fn new(plugins: Vec<Box<dyn TrackerPlugin>>, sink: Arc<dyn ErrorSink>) -> Self {
        Self { plugins, sink }
    }

    /// Creates a manager reporting through `tracing`.
    #[must_use]
    pub fn with_default_sink(plugins: Vec<Box<dyn TrackerPlugin>>) -> Self {
        Self::new(plugins, Arc::new(TracingSink))
    }

    /// The sink plugins report to.
    #[must_use]
    pub fn sink(&self) -> Arc<dyn ErrorSink> {
        Arc::clone(&self.sink)
    }

    /// Number of registered plugins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Whether no plugins are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// True if at least one plugin is currently usable.
    ///
    /// Callers can use this to skip enrichment/validation entirely.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.plugins.iter().any(|p| p.is_usable())
    }

    /// Runs the `initialize` hook on every usable plugin.
    pub fn initialize_all(&self) {
        for plugin in self.usable() {
            if let Err(error) = plugin.initialize() {
                self.report_hook_failure(plugin.name(), "initialize", &error);
            }
        }
    }

    /// Runs the `validate` hook on every usable plugin, in order.
    ///
    /// Every plugin gets to see the event; there is no short-circuit, so
    /// one event can accumulate several reported violations.
    pub fn validate(&self, event: &Event) {
        for plugin in self.usable() {
            if let Err(error) = plugin.validate(event, self.sink.as_ref()) {
                self.report_hook_failure(plugin.name(), "validate", &error);
            }
        }
    }

    /// Runs the `enrich` hook on every usable plugin, in order.
    ///
    /// Later plugins see contexts appended by earlier ones.
    pub fn enrich(&self, contexts: &mut Contexts) {
        for plugin in self.usable() {
            if let Err(error) = plugin.enrich(contexts) {
                self.report_hook_failure(plugin.name(), "enrich", &error);
            }
        }
    }

    fn usable(&self) -> impl Iterator<Item = &dyn TrackerPlugin> {
        self.plugins.iter().filter_map(|p| {
            if p.is_usable() {
                Some(p.as_ref())
            } else {
                debug!(plugin = p.name(), "skipping unusable plugin");
                None
            }
        })
    }

    fn report_hook_failure(
        &self,
        plugin: &str,
        hook: &str,
        error: &crate::plugin::PluginError,
    ) {
        self.sink.report(
            Severity::Error,
            &format!("plugin '{plugin}' failed in {hook}: {error}"),
            None,
        );
    }
}
