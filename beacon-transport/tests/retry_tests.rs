use beacon_transport::mock::{
    FailingTransport, FlakyTransport, RecordingTransport, UnusableTransport,
};
use beacon_transport::{
    RetryConfig, Transport, TransportError, TransportGroup, TransportRetry, TransportSwitch,
};
use beacon_types::Event;
use std::time::Duration;

fn batch() -> Vec<Event> {
    vec![Event::new("PressEvent")]
}

fn fast_retry(max_attempts: u32) -> RetryConfig {
    RetryConfig {
        max_attempts,
        initial_delay: Duration::from_millis(10),
        factor: 2.0,
        max_delay: Duration::from_millis(100),
    }
}

// ── Attempt accounting ───────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn fails_twice_then_succeeds_uses_exactly_three_attempts() {
    let flaky = FlakyTransport::new(2);
    let retry = TransportRetry::with_config(Box::new(flaky.clone()), fast_retry(3));

    let result = retry.handle(&batch()).await;

    assert!(result.is_ok());
    assert_eq!(flaky.attempts(), 3);
    assert_eq!(flaky.batches().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn success_short_circuits_remaining_attempts() {
    let flaky = FlakyTransport::new(0);
    let retry = TransportRetry::with_config(Box::new(flaky.clone()), fast_retry(10));

    retry.handle(&batch()).await.unwrap();

    assert_eq!(flaky.attempts(), 1);
}

#[tokio::test(start_paused = true)]
async fn exhaustion_surfaces_with_attempt_count() {
    let failing = FailingTransport::new();
    let retry = TransportRetry::with_config(Box::new(failing.clone()), fast_retry(4));

    let result = retry.handle(&batch()).await;

    assert_eq!(failing.attempts(), 4);
    match result {
        Err(TransportError::RetryExhausted {
            attempts,
            last_error,
        }) => {
            assert_eq!(attempts, 4);
            assert!(matches!(*last_error, TransportError::Network(_)));
        }
        other => panic!("expected RetryExhausted, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn zero_max_attempts_still_tries_once() {
    let failing = FailingTransport::new();
    let retry = TransportRetry::with_config(Box::new(failing.clone()), fast_retry(0));

    let result = retry.handle(&batch()).await;

    assert_eq!(failing.attempts(), 1);
    assert!(result.is_err());
}

// ── Backoff curve ────────────────────────────────────────────────

#[test]
fn delay_grows_exponentially_and_caps() {
    let config = RetryConfig {
        max_attempts: 10,
        initial_delay: Duration::from_millis(100),
        factor: 2.0,
        max_delay: Duration::from_millis(500),
    };

    assert_eq!(config.delay_for(1), Duration::from_millis(100));
    assert_eq!(config.delay_for(2), Duration::from_millis(200));
    assert_eq!(config.delay_for(3), Duration::from_millis(400));
    // Capped from here on.
    assert_eq!(config.delay_for(4), Duration::from_millis(500));
    assert_eq!(config.delay_for(9), Duration::from_millis(500));
}

#[test]
fn delay_is_monotonic() {
    let config = RetryConfig::default();
    let mut previous = Duration::ZERO;
    for attempt in 1..=12 {
        let delay = config.delay_for(attempt);
        assert!(delay >= previous, "delay shrank at attempt {attempt}");
        previous = delay;
    }
}

#[tokio::test(start_paused = true)]
async fn waits_between_attempts() {
    let failing = FailingTransport::new();
    let retry = TransportRetry::with_config(
        Box::new(failing.clone()),
        RetryConfig {
            max_attempts: 3,
            initial_delay: Duration::from_secs(1),
            factor: 2.0,
            max_delay: Duration::from_secs(30),
        },
    );

    let started = tokio::time::Instant::now();
    let _ = retry.handle(&batch()).await;

    // 1 s after the first failure, 2 s after the second.
    assert_eq!(started.elapsed(), Duration::from_secs(3));
}

// ── Delegation ───────────────────────────────────────────────────

#[tokio::test]
async fn usability_delegates_to_inner() {
    let usable = TransportRetry::new(Box::new(RecordingTransport::new()));
    assert!(usable.is_usable());

    let unusable = TransportRetry::new(Box::new(UnusableTransport::new()));
    assert!(!unusable.is_usable());
}

// ── Composition ──────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn retry_wraps_arbitrary_compositions() {
    // Retry(Switch(Unusable, Group(Flaky, Failing))): the switch skips
    // the unusable candidate, the group fails while the flaky member is
    // down and succeeds once it recovers.
    let flaky = FlakyTransport::new(1);
    let group = TransportGroup::new(vec![
        Box::new(flaky.clone()),
        Box::new(FailingTransport::new()),
    ]);
    let switch = TransportSwitch::new(vec![
        Box::new(UnusableTransport::new()),
        Box::new(group),
    ]);
    let retry = TransportRetry::with_config(Box::new(switch), fast_retry(5));

    let result = retry.handle(&batch()).await;

    assert!(result.is_ok());
    // First group attempt failed everywhere, second succeeded via flaky.
    assert_eq!(flaky.attempts(), 2);
}
