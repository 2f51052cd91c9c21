//! Locale enrichment.

use crate::plugin::{PluginResult, TrackerPlugin};
use beacon_types::{Context, Contexts};
use tracing::debug;

/// Provider of the active locale identifier, e.g. `en-US`.
pub type LocaleProvider = dyn Fn() -> Option<String> + Send + Sync;

/// Adds a `LocaleContext` global context on every enrichment.
///
/// The locale is resolved through a caller-supplied provider at enrich
/// time. A provider returning `None` skips enrichment quietly; some
/// environments simply have no locale to report.
pub struct LocaleContextPlugin {
    provider: Box<LocaleProvider>,
}

impl LocaleContextPlugin {
    /// Creates the plugin with a locale provider.
    #[must_use]
    pub fn new(provider: impl Fn() -> Option<String> + Send + Sync + 'static) -> Self {
        Self {
            provider: Box::new(provider),
        }
    }
}

impl TrackerPlugin for LocaleContextPlugin {
    fn name(&self) -> &'static str {
        "LocaleContextPlugin"
    }

    fn enrich(&self, contexts: &mut Contexts) -> PluginResult<()> {
        match (self.provider)() {
            Some(locale) => contexts.push_global(Context::locale(locale)),
            None => debug!("locale provider returned nothing, skipping enrichment"),
        }
        Ok(())
    }
}
