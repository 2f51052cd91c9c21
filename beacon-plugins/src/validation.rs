//! Context presence and uniqueness validation.
//!
//! Two rule shapes cover everything the pipeline needs: "this global
//! context must be present (and maybe unique)" and the same for location
//! contexts. Rules classify, build a readable message, and hand it to the
//! error sink; they never fail the event.

use crate::plugin::{PluginResult, TrackerPlugin};
use crate::sink::{ErrorSink, Severity};
use beacon_types::Event;
use std::fmt;

/// Which context collection a rule inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextScope {
    Global,
    Location,
}

impl fmt::Display for ContextScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => write!(f, "Global Contexts"),
            Self::Location => write!(f, "Location Stack"),
        }
    }
}

/// How a rule was violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// No context of the target type was found. An event with empty
    /// context collections always classifies as this, never anything else.
    Missing,
    /// More than one match while the rule requires exactly one.
    Duplicated,
}

/// Predicate deciding whether a rule applies to a given event.
pub type EventPredicate = dyn Fn(&Event) -> bool + Send + Sync;

/// A configurable presence/uniqueness check over one context type.
pub struct ContextValidationRule {
    scope: ContextScope,
    context_type: String,
    once: bool,
    applies_to: Option<Box<EventPredicate>>,
    log_prefix: Option<String>,
}

impl ContextValidationRule {
    /// Rule over the event's global contexts.
    #[must_use]
    pub fn global(context_type: impl Into<String>) -> Self {
        Self {
            scope: ContextScope::Global,
            context_type: context_type.into(),
            once: false,
            applies_to: None,
            log_prefix: None,
        }
    }

    /// Rule over the event's location stack.
    #[must_use]
    pub fn location(context_type: impl Into<String>) -> Self {
        Self {
            scope: ContextScope::Location,
            context_type: context_type.into(),
            once: false,
            applies_to: None,
            log_prefix: None,
        }
    }

    /// Requires the context to appear exactly once.
    #[must_use]
    pub fn once(mut self) -> Self {
        self.once = true;
        self
    }

    /// Restricts the rule to events matching the predicate.
    #[must_use]
    pub fn applies_to(mut self, predicate: impl Fn(&Event) -> bool + Send + Sync + 'static) -> Self {
        self.applies_to = Some(Box::new(predicate));
        self
    }

    /// Prefixes reported messages, e.g. with the owning plugin's name.
    #[must_use]
    pub fn with_log_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.log_prefix = Some(prefix.into());
        self
    }

    /// The rule's name, by scope.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self.scope {
            ContextScope::Global => "GlobalContextValidationRule",
            ContextScope::Location => "LocationContextValidationRule",
        }
    }

    /// The context type this rule targets.
    #[must_use]
    pub fn context_type(&self) -> &str {
        &self.context_type
    }

    /// Checks the event, reporting at most one violation to the sink.
    pub fn validate(&self, event: &Event, sink: &dyn ErrorSink) {
        if let Some(predicate) = &self.applies_to {
            if !predicate(event) {
                return;
            }
        }

        let matches = match self.scope {
            ContextScope::Global => event.count_global(&self.context_type),
            ContextScope::Location => event.count_location(&self.context_type),
        };

        let kind = if matches == 0 {
            ViolationKind::Missing
        } else if self.once && matches > 1 {
            ViolationKind::Duplicated
        } else {
            return;
        };

        let message = self.message(kind, &event.event_type);
        sink.report(Severity::Error, &message, Some(event));
    }

    fn message(&self, kind: ViolationKind, event_type: &str) -> String {
        let body = match kind {
            ViolationKind::Missing => format!(
                "{} is missing from the {} of {}.",
                self.context_type, self.scope, event_type
            ),
            ViolationKind::Duplicated => format!(
                "Only one {} should be present in the {} of {}.",
                self.context_type, self.scope, event_type
            ),
        };
        match &self.log_prefix {
            Some(prefix) => format!("{prefix}: {body}"),
            None => body,
        }
    }
}

impl fmt::Debug for ContextValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(self.name())
            .field("context_type", &self.context_type)
            .field("once", &self.once)
            .field("has_predicate", &self.applies_to.is_some())
            .finish()
    }
}

/// Plugin wrapping a set of validation rules.
///
/// Producers declare the invariants they promise to uphold, e.g. "every
/// event carries exactly one `RootLocationContext`", and this plugin
/// checks them during the validation phase.
pub struct ContextValidationPlugin {
    rules: Vec<ContextValidationRule>,
}

impl ContextValidationPlugin {
    /// Creates a plugin from a list of rules, checked in order.
    #[must_use]
    pub fn new(rules: Vec<ContextValidationRule>) -> Self {
        Self { rules }
    }
}

impl TrackerPlugin for ContextValidationPlugin {
    fn name(&self) -> &'static str {
        "ContextValidationPlugin"
    }

    fn validate(&self, event: &Event, sink: &dyn ErrorSink) -> PluginResult<()> {
        for rule in &self.rules {
            rule.validate(event, sink);
        }
        Ok(())
    }
}
