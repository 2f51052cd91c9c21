//! Application identity enrichment.

use crate::plugin::{PluginResult, TrackerPlugin};
use beacon_types::{Context, Contexts};

/// Adds an `ApplicationContext` global context to every event.
///
/// The context is built once from the configured application id and
/// appended during enrichment, so every event leaving the tracker carries
/// the identity of the installation that produced it.
pub struct ApplicationContextPlugin {
    context: Context,
}

impl ApplicationContextPlugin {
    /// Creates the plugin for the given application id.
    #[must_use]
    pub fn new(application_id: impl Into<String>) -> Self {
        Self {
            context: Context::application(application_id),
        }
    }

    /// The context this plugin appends.
    #[must_use]
    pub fn context(&self) -> &Context {
        &self.context
    }
}

impl TrackerPlugin for ApplicationContextPlugin {
    fn name(&self) -> &'static str {
        "ApplicationContextPlugin"
    }

    fn enrich(&self, contexts: &mut Contexts) -> PluginResult<()> {
        contexts.push_global(self.context.clone());
        Ok(())
    }
}
