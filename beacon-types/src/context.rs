//! Location and global contexts.
//!
//! A context is a small typed record describing either *where* an event
//! happened (location contexts, stacked root-to-leaf) or ambient metadata
//! that applies regardless of location (global contexts: application
//! identity, locale, request path, ...).
//!
//! The core does not enumerate context types: a context is its `_type`
//! discriminator, an `id`, and whatever extra fields that type carries.
//! Well-known constructors exist for the context types the bundled
//! plugins produce.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single context entry.
///
/// Serializes to the flat JSON object collectors expect:
/// `{"_type": "PathContext", "id": "/checkout", ...extra fields}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Context {
    /// Discriminator, e.g. `ApplicationContext`.
    #[serde(rename = "_type")]
    pub context_type: String,

    /// Identifier within the discriminator, e.g. an application id or a URL.
    pub id: String,

    /// Discriminator-specific extra fields.
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl Context {
    /// Creates a context with no extra properties.
    #[must_use]
    pub fn new(context_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            context_type: context_type.into(),
            id: id.into(),
            properties: Map::new(),
        }
    }

    /// Adds an extra property.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    // ── Well-known constructors ─────────────────────────────────

    /// Application identity, attached to every event of an installation.
    #[must_use]
    pub fn application(id: impl Into<String>) -> Self {
        Self::new("ApplicationContext", id)
    }

    /// The path (URL, route, screen name) the event originated from.
    #[must_use]
    pub fn path(id: impl Into<String>) -> Self {
        Self::new("PathContext", id)
    }

    /// The locale active when the event fired, e.g. `en-US`.
    #[must_use]
    pub fn locale(id: impl Into<String>) -> Self {
        Self::new("LocaleContext", id)
    }

    /// HTTP metadata (user agent, referrer) for web producers.
    #[must_use]
    pub fn http(id: impl Into<String>) -> Self {
        Self::new("HttpContext", id)
    }

    /// Root of a location stack.
    #[must_use]
    pub fn root_location(id: impl Into<String>) -> Self {
        Self::new("RootLocationContext", id)
    }

    /// A content section within the location hierarchy.
    #[must_use]
    pub fn content(id: impl Into<String>) -> Self {
        Self::new("ContentContext", id)
    }
}

/// Mutable holder handed to the enrichment phase.
///
/// Plugins append to these collections; nothing else in the pipeline may
/// mutate contexts. After enrichment the tracker rebuilds the event and
/// the contexts are frozen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contexts {
    /// Root-to-leaf path describing where the event originated.
    pub location_stack: Vec<Context>,
    /// Ambient metadata, in insertion order. Duplicates are preserved;
    /// whether they are legal is a validation concern.
    pub global_contexts: Vec<Context>,
}

impl Contexts {
    /// Creates an empty holder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a location context at the leaf end of the stack.
    pub fn push_location(&mut self, context: Context) {
        self.location_stack.push(context);
    }

    /// Appends a global context.
    pub fn push_global(&mut self, context: Context) {
        self.global_contexts.push(context);
    }

    /// Counts global contexts with the given discriminator.
    #[must_use]
    pub fn count_global(&self, context_type: &str) -> usize {
        self.global_contexts
            .iter()
            .filter(|c| c.context_type == context_type)
            .count()
    }

    /// Counts location contexts with the given discriminator.
    #[must_use]
    pub fn count_location(&self, context_type: &str) -> usize {
        self.location_stack
            .iter()
            .filter(|c| c.context_type == context_type)
            .count()
    }
}
