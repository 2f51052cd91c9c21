//! Plugin lifecycle, enrichment and validation for Beacon.
//!
//! Plugins are the extension seam of the pipeline: each one may hook into
//! initialization, context enrichment and event validation, and declares
//! at runtime whether it is usable in the current environment.
//!
//! # Architecture
//!
//! - **TrackerPlugin**: the hook trait; every hook has a default no-op
//! - **PluginManager**: owns an ordered plugin list and dispatches hooks
//! - **ContextValidationRule**: presence/uniqueness checks over contexts
//! - **ErrorSink**: where violations and hook failures are reported
//!
//! Nothing in this crate can fail the host application: hook errors are
//! caught and reported, validation reports and never blocks.

mod application_context;
mod locale_context;
mod manager;
mod path_context;
mod plugin;
mod sink;
mod validation;

pub use application_context::ApplicationContextPlugin;
pub use locale_context::LocaleContextPlugin;
pub use manager::PluginManager;
pub use path_context::PathContextPlugin;
pub use plugin::{PluginError, PluginResult, TrackerPlugin};
pub use sink::{ErrorSink, RecordedReport, RecordingSink, Severity, TracingSink};
pub use validation::{
    ContextScope, ContextValidationPlugin, ContextValidationRule, ViolationKind,
};
