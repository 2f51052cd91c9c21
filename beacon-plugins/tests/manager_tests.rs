use beacon_plugins::{
    ErrorSink, PluginError, PluginManager, PluginResult, RecordingSink, TrackerPlugin,
};
use beacon_types::{Context, Contexts, Event};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Appends a marker global context so ordering is observable.
struct MarkerPlugin {
    marker: &'static str,
    usable: bool,
}

impl MarkerPlugin {
    fn new(marker: &'static str) -> Self {
        Self {
            marker,
            usable: true,
        }
    }

    fn unusable(marker: &'static str) -> Self {
        Self {
            marker,
            usable: false,
        }
    }
}

impl TrackerPlugin for MarkerPlugin {
    fn name(&self) -> &'static str {
        "MarkerPlugin"
    }

    fn enrich(&self, contexts: &mut Contexts) -> PluginResult<()> {
        contexts.push_global(Context::new("MarkerContext", self.marker));
        Ok(())
    }

    fn validate(&self, event: &Event, sink: &dyn ErrorSink) -> PluginResult<()> {
        sink.report(
            beacon_plugins::Severity::Warning,
            &format!("seen by {}", self.marker),
            Some(event),
        );
        Ok(())
    }

    fn is_usable(&self) -> bool {
        self.usable
    }
}

/// Fails every hook it implements.
struct BrokenPlugin;

impl TrackerPlugin for BrokenPlugin {
    fn name(&self) -> &'static str {
        "BrokenPlugin"
    }

    fn initialize(&self) -> PluginResult<()> {
        Err(PluginError::Hook("init exploded".into()))
    }

    fn enrich(&self, _contexts: &mut Contexts) -> PluginResult<()> {
        Err(PluginError::Hook("enrich exploded".into()))
    }

    fn validate(&self, _event: &Event, _sink: &dyn ErrorSink) -> PluginResult<()> {
        Err(PluginError::Hook("validate exploded".into()))
    }
}

/// Counts initialize calls.
struct InitCounter(Arc<AtomicUsize>);

impl TrackerPlugin for InitCounter {
    fn name(&self) -> &'static str {
        "InitCounter"
    }

    fn initialize(&self) -> PluginResult<()> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn manager_with(
    plugins: Vec<Box<dyn TrackerPlugin>>,
) -> (PluginManager, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::new());
    (PluginManager::new(plugins, sink.clone()), sink)
}

// ── Enrichment ordering ──────────────────────────────────────────

#[test]
fn enrich_runs_in_registration_order() {
    let (manager, _sink) = manager_with(vec![
        Box::new(MarkerPlugin::new("first")),
        Box::new(MarkerPlugin::new("second")),
        Box::new(MarkerPlugin::new("third")),
    ]);

    let mut contexts = Contexts::new();
    manager.enrich(&mut contexts);

    let ids: Vec<&str> = contexts.global_contexts.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["first", "second", "third"]);
}

#[test]
fn later_plugins_see_earlier_output() {
    struct CountingPlugin;
    impl TrackerPlugin for CountingPlugin {
        fn name(&self) -> &'static str {
            "CountingPlugin"
        }
        fn enrich(&self, contexts: &mut Contexts) -> PluginResult<()> {
            let seen = contexts.global_contexts.len();
            contexts.push_global(Context::new("CountContext", seen.to_string()));
            Ok(())
        }
    }

    let (manager, _sink) = manager_with(vec![
        Box::new(MarkerPlugin::new("first")),
        Box::new(CountingPlugin),
    ]);

    let mut contexts = Contexts::new();
    manager.enrich(&mut contexts);

    // CountingPlugin observed the marker appended before it ran.
    assert_eq!(contexts.global_contexts[1].id, "1");
}

// ── Usability ────────────────────────────────────────────────────

#[test]
fn unusable_plugins_are_skipped_silently() {
    let (manager, sink) = manager_with(vec![
        Box::new(MarkerPlugin::unusable("skipped")),
        Box::new(MarkerPlugin::new("ran")),
    ]);

    let mut contexts = Contexts::new();
    manager.enrich(&mut contexts);

    assert_eq!(contexts.global_contexts.len(), 1);
    assert_eq!(contexts.global_contexts[0].id, "ran");
    // Skipping is not an error.
    assert!(sink.is_empty());
}

#[test]
fn manager_usable_if_any_plugin_usable() {
    let (all_unusable, _) = manager_with(vec![
        Box::new(MarkerPlugin::unusable("a")),
        Box::new(MarkerPlugin::unusable("b")),
    ]);
    assert!(!all_unusable.is_usable());

    let (one_usable, _) = manager_with(vec![
        Box::new(MarkerPlugin::unusable("a")),
        Box::new(MarkerPlugin::new("b")),
    ]);
    assert!(one_usable.is_usable());

    let (empty, _) = manager_with(vec![]);
    assert!(!empty.is_usable());
    assert!(empty.is_empty());
}

// ── Failure isolation ────────────────────────────────────────────

#[test]
fn broken_plugin_does_not_stop_the_chain() {
    let (manager, sink) = manager_with(vec![
        Box::new(MarkerPlugin::new("before")),
        Box::new(BrokenPlugin),
        Box::new(MarkerPlugin::new("after")),
    ]);

    let mut contexts = Contexts::new();
    manager.enrich(&mut contexts);

    // Both healthy plugins enriched despite the failure between them.
    let ids: Vec<&str> = contexts.global_contexts.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["before", "after"]);

    // And the failure was reported.
    let messages = sink.messages();
    assert!(messages.iter().any(|m| m.contains("BrokenPlugin") && m.contains("enrich")));
}

#[test]
fn validate_reports_from_all_plugins_without_short_circuit() {
    let (manager, sink) = manager_with(vec![
        Box::new(MarkerPlugin::new("one")),
        Box::new(BrokenPlugin),
        Box::new(MarkerPlugin::new("two")),
    ]);

    manager.validate(&Event::new("PressEvent"));

    let messages = sink.messages();
    assert!(messages.iter().any(|m| m.contains("seen by one")));
    assert!(messages.iter().any(|m| m.contains("seen by two")));
    assert!(messages.iter().any(|m| m.contains("validate exploded")));
}

#[test]
fn initialize_failure_is_reported_and_contained() {
    let count = Arc::new(AtomicUsize::new(0));
    let (manager, sink) = manager_with(vec![
        Box::new(BrokenPlugin),
        Box::new(InitCounter(count.clone())),
    ]);

    manager.initialize_all();

    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert!(sink.messages().iter().any(|m| m.contains("init exploded")));
}
