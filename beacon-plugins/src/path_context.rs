//! Current-path enrichment.

use crate::plugin::{PluginResult, TrackerPlugin};
use beacon_types::{Context, Contexts};

/// Provider of the current path (URL, route, screen name).
pub type PathProvider = dyn Fn() -> Option<String> + Send + Sync;

/// Adds a fresh `PathContext` global context on every enrichment.
///
/// The path is read through a caller-supplied provider at enrich time,
/// not at construction, so each event records where it actually fired.
/// A provider returning `None` (no current path in this environment)
/// enriches nothing and is not an error.
pub struct PathContextPlugin {
    provider: Box<PathProvider>,
}

impl PathContextPlugin {
    /// Creates the plugin with a path provider.
    #[must_use]
    pub fn new(provider: impl Fn() -> Option<String> + Send + Sync + 'static) -> Self {
        Self {
            provider: Box::new(provider),
        }
    }

    /// Convenience constructor for a fixed path (tests, single-screen apps).
    #[must_use]
    pub fn fixed(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(move || Some(path.clone()))
    }
}

impl TrackerPlugin for PathContextPlugin {
    fn name(&self) -> &'static str {
        "PathContextPlugin"
    }

    fn enrich(&self, contexts: &mut Contexts) -> PluginResult<()> {
        if let Some(path) = (self.provider)() {
            contexts.push_global(Context::path(path));
        }
        Ok(())
    }
}
