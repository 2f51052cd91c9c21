use beacon_plugins::{ContextValidationRule, RecordingSink, Severity};
use beacon_types::{Context, Event};

fn press_event() -> Event {
    Event::new("PressEvent")
}

// ── Classification: global scope ─────────────────────────────────

#[test]
fn zero_matches_reports_missing() {
    let rule = ContextValidationRule::global("ApplicationContext");
    let sink = RecordingSink::new();

    rule.validate(&press_event(), &sink);

    let reports = sink.reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].severity, Severity::Error);
    assert!(reports[0].message.contains("ApplicationContext is missing"));
    assert_eq!(reports[0].event_type.as_deref(), Some("PressEvent"));
}

#[test]
fn empty_collections_always_classify_as_missing() {
    // Even with `once` set, an empty event is Missing, never Duplicated.
    let rule = ContextValidationRule::global("ApplicationContext").once();
    let sink = RecordingSink::new();

    rule.validate(&press_event(), &sink);

    assert_eq!(sink.reports().len(), 1);
    assert!(sink.messages()[0].contains("is missing"));
}

#[test]
fn exactly_one_match_with_once_reports_nothing() {
    let rule = ContextValidationRule::global("ApplicationContext").once();
    let sink = RecordingSink::new();
    let event = press_event().with_global_context(Context::application("app"));

    rule.validate(&event, &sink);

    assert!(sink.is_empty());
}

#[test]
fn two_matches_with_once_reports_duplicated() {
    let rule = ContextValidationRule::global("ApplicationContext").once();
    let sink = RecordingSink::new();
    let event = press_event()
        .with_global_context(Context::application("a"))
        .with_global_context(Context::application("b"));

    rule.validate(&event, &sink);

    let messages = sink.messages();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("Only one ApplicationContext"));
}

#[test]
fn two_matches_without_once_is_fine() {
    let rule = ContextValidationRule::global("ApplicationContext");
    let sink = RecordingSink::new();
    let event = press_event()
        .with_global_context(Context::application("a"))
        .with_global_context(Context::application("b"));

    rule.validate(&event, &sink);

    assert!(sink.is_empty());
}

// ── Classification: location scope ───────────────────────────────

#[test]
fn location_rule_checks_location_stack_only() {
    let rule = ContextValidationRule::location("RootLocationContext").once();
    let sink = RecordingSink::new();
    // Present as a global context, but missing from the location stack.
    let event = press_event().with_global_context(Context::root_location("home"));

    rule.validate(&event, &sink);

    assert_eq!(sink.reports().len(), 1);
    assert!(sink.messages()[0].contains("missing from the Location Stack"));
}

#[test]
fn location_rule_duplicated() {
    let rule = ContextValidationRule::location("RootLocationContext").once();
    let sink = RecordingSink::new();
    let event = press_event()
        .with_location_context(Context::root_location("a"))
        .with_location_context(Context::root_location("b"));

    rule.validate(&event, &sink);

    assert!(sink.messages()[0].contains("Only one RootLocationContext"));
}

// ── Applicability predicate ──────────────────────────────────────

#[test]
fn rule_skips_events_outside_predicate() {
    let rule = ContextValidationRule::global("PathContext")
        .once()
        .applies_to(|event| event.event_type == "MediaEvent");
    let sink = RecordingSink::new();

    // PressEvent does not match the predicate: no report despite missing.
    rule.validate(&press_event(), &sink);
    assert!(sink.is_empty());

    // MediaEvent matches and is missing the context.
    rule.validate(&Event::new("MediaEvent"), &sink);
    assert_eq!(sink.reports().len(), 1);
}

// ── Message shape ────────────────────────────────────────────────

#[test]
fn message_interpolates_event_type() {
    let rule = ContextValidationRule::global("LocaleContext");
    let sink = RecordingSink::new();

    rule.validate(&Event::new("VisibleEvent"), &sink);

    assert!(sink.messages()[0].contains("VisibleEvent"));
}

#[test]
fn log_prefix_prepends_reports() {
    let rule = ContextValidationRule::global("LocaleContext").with_log_prefix("LocaleContextPlugin");
    let sink = RecordingSink::new();

    rule.validate(&press_event(), &sink);

    assert!(sink.messages()[0].starts_with("LocaleContextPlugin: "));
}

// ── Idempotence ──────────────────────────────────────────────────

#[test]
fn validating_twice_reports_identically() {
    let rule = ContextValidationRule::global("ApplicationContext").once();
    let event = press_event()
        .with_global_context(Context::application("a"))
        .with_global_context(Context::application("b"));

    let first = RecordingSink::new();
    rule.validate(&event, &first);
    let second = RecordingSink::new();
    rule.validate(&event, &second);

    assert_eq!(first.reports(), second.reports());
}
